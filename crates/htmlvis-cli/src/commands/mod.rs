//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod formats;
pub(crate) mod meta;
pub(crate) mod render;

pub(crate) use check::CheckArgs;
pub(crate) use formats::FormatsArgs;
pub(crate) use meta::MetaArgs;
pub(crate) use render::RenderArgs;
