// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cache;
pub mod client;
pub mod invalidation;
pub mod key;

pub use cache::{FetchTicket, QueryCache, Superseded};
pub use client::{QueryClient, QueryConfig, QueryState};
pub use invalidation::{INVALIDATION_TABLE, Mutation};
pub use key::{KeyPart, QueryKey, Resource};
