// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]
//! Area of a permanent preservation area (APP) along a watercourse computed from two
//! surveyed margins with the composite trapezoidal rule and Simpson's first rule.
pub mod Utils;
pub mod numerical;
