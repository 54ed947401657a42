// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod action;
pub mod collaborators;
pub mod f1;
pub mod ids;
pub mod items;
pub mod model;
pub mod quote_reducer;
pub mod reducer;
pub mod state;
pub mod ui_reducer;

pub use action::*;
pub use collaborators::*;
pub use ids::*;
pub use model::*;
pub use reducer::*;
pub use state::*;
