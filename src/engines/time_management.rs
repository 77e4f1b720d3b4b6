//! Per-move budget resolution.
//!
//! The caller passes raw limits from the `go` request; the engine merges them
//! over its configured defaults. Explicit values always win.

use crate::engines::engine_trait::GoParams;
use crate::search::iterative_deepening::SearchConfig;

/// Merge `params` over `base`. A depth of zero is treated as one, and a
/// movetime of zero still allows the first deepening pass.
pub fn resolve_search_config(base: &SearchConfig, params: &GoParams) -> SearchConfig {
    let mut resolved = *base;
    if let Some(depth) = params.depth {
        resolved.max_depth = depth.max(1);
    }
    if let Some(movetime) = params.movetime_ms {
        resolved.movetime_ms = Some(movetime);
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::resolve_search_config;
    use crate::engines::engine_trait::GoParams;
    use crate::game_state::variant::Variant;
    use crate::search::iterative_deepening::SearchConfig;

    #[test]
    fn empty_params_keep_base() {
        let base = SearchConfig::for_variant(Variant::Five5x5);
        assert_eq!(resolve_search_config(&base, &GoParams::default()), base);
    }

    #[test]
    fn explicit_limits_override_base() {
        let base = SearchConfig::for_variant(Variant::Five5x5);
        let params = GoParams {
            depth: Some(0),
            movetime_ms: Some(250),
        };
        let resolved = resolve_search_config(&base, &params);
        assert_eq!(resolved.max_depth, 1);
        assert_eq!(resolved.movetime_ms, Some(250));
        assert_eq!(resolved.cache, base.cache);
    }
}
