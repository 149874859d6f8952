// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod api_client_test;
pub mod auth_test;
pub mod helpers;
pub mod load_harness_test;
pub mod upload_test;
