// ABOUTME: Test helper module index
// ABOUTME: Exposes the axum oneshot request builder used across HTTP tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod axum_test;
