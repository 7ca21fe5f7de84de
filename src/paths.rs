/// Convert a native Windows path into the Cygwin form rsync understands.
///
/// `C:\Users\me` becomes `/cygdrive/c/Users/me`. Input without a
/// drive-letter prefix is already portable and comes back unchanged.
pub fn to_portable(path: &str) -> String {
    let bytes = path.as_bytes();

    if bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
    {
        let drive = (bytes[0] as char).to_ascii_lowercase();
        return format!("/cygdrive/{}{}", drive, path[2..].replace('\\', "/"));
    }

    path.to_string()
}

/// Forward-slash form of a relative path, for rsync exclude patterns.
pub fn to_slashes(path: &str) -> String {
    path.replace('\\', "/")
}
