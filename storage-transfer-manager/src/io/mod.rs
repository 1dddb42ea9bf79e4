/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

mod aggregated_bytes;

// re-exports
pub use self::aggregated_bytes::AggregatedBytes;
