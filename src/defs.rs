// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

// Program name, also the name a bare invocation must not be mistaken for
pub const PROGRAM_NAME: &str = "ezfuse";
// Symlinks named ez<fs> select <fs> as the mount binary
pub const PROGRAM_PREFIX: &str = "ez";

pub const MOUNTPOINT_PREFIX: &str = "ezmount-";

pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_OPENER: &str = "xdg-open";
pub const DEFAULT_SHELL: &str = "bash";
pub const DEFAULT_UMOUNT: &[&str] = &["fusermount", "-u", "-z"];

pub const VERSION_FLAG: &str = "--version";

// Exit status when the initial mount fails
pub const EXIT_MOUNT_FAILED: u8 = 2;
