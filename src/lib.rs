// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mount a FUSE filesystem in a throwaway directory and drive it from a
//! small interactive menu.

pub mod conf;
pub mod core;
pub mod defs;
pub mod utils;
