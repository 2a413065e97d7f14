// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in backends.

pub mod flatvec;
pub mod uniform;
