// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    fs,
    path::{Path, PathBuf},
};

use procfs::process::Process;

/// Whether `path` is currently a mount point in this process' namespace.
pub fn is_mounted<P: AsRef<Path>>(path: P) -> bool {
    let target = fs::canonicalize(path.as_ref()).unwrap_or_else(|_| path.as_ref().to_path_buf());

    if let Ok(process) = Process::myself()
        && let Ok(mountinfo) = process.mountinfo()
    {
        return mountinfo.into_iter().any(|m| m.mount_point == target);
    }

    if let Ok(content) = fs::read_to_string("/proc/mounts") {
        return mounts_contain(&content, &target);
    }

    false
}

// /proc/mounts escapes blanks in paths as octal (\040)
fn mounts_contain(content: &str, target: &Path) -> bool {
    content
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .any(|mount_point| PathBuf::from(unescape_octal(mount_point)) == target)
}

fn unescape_octal(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let escaped = (bytes[i] == b'\\' && i + 3 < bytes.len())
            .then(|| field.get(i + 1..i + 4))
            .flatten()
            .filter(|digits| digits.bytes().all(|b| (b'0'..=b'7').contains(&b)))
            .and_then(|digits| u8::from_str_radix(digits, 8).ok());

        match escaped {
            Some(value) => {
                out.push(value);
                i += 4;
            }
            None => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOUNTS: &str = "\
proc /proc proc rw,nosuid,nodev,noexec,relatime 0 0
sshfs#host:/ /home/user/ezmount-sshfs-x1 fuse.sshfs rw,nosuid,nodev 0 0
archivemount /home/user/my\\040dir fuse.archivemount rw 0 0
";

    #[test]
    fn finds_plain_mount_point() {
        assert!(mounts_contain(MOUNTS, Path::new("/home/user/ezmount-sshfs-x1")));
        assert!(!mounts_contain(MOUNTS, Path::new("/home/user")));
    }

    #[test]
    fn finds_escaped_mount_point() {
        assert!(mounts_contain(MOUNTS, Path::new("/home/user/my dir")));
    }

    #[test]
    fn fresh_directory_is_not_mounted() {
        let dir = tempfile::tempdir().unwrap();

        assert!(!is_mounted(dir.path()));
    }
}
