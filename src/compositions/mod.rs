pub mod memo_rerender;
pub(crate) mod registry;
pub mod ssr_hydration;
pub(crate) mod theme;
