// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod action;
pub mod binary;
pub mod mountpoint;
pub mod session;

pub use self::{
    action::Action,
    mountpoint::Mountpoint,
    session::{Outcome, Session},
};
