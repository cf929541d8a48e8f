// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-stop import for every operator extension trait.

pub use crate::amb::AmbExt;
pub use crate::combine_latest::CombineLatestExt;
pub use crate::concat_with::ConcatWithExt;
pub use crate::connectable::{ConnectableSignal, MulticastExt};
pub use crate::debug::DebugExt;
pub use crate::filtering::{CompactExt, FilterExt};
pub use crate::flatten::{FlatMapExt, FlattenExt};
pub use crate::merge_with::MergeWithExt;
pub use crate::pausable::PausableExt;
pub use crate::recover::RecoverExt;
pub use crate::start_with::StartWithExt;
pub use crate::tap::TapExt;
pub use crate::transform::TransformExt;
pub use crate::zip::ZipExt;
