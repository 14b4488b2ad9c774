pub(crate) fn split_shell_args<T: AsRef<str> + ?Sized>(s: &T) -> Vec<String> {
    shlex::split(s.as_ref()).expect("Invalid shell args")
}
