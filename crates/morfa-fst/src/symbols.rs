// Epsilon marker handling.
//
// Engine lookups and path extraction return strings that may still carry
// the epsilon marker wherever a transition consumed or produced nothing.
// Human-facing results must have every occurrence removed.

/// The epsilon marker as engines print it.
pub const EPSILON_SYMBOL: &str = "@_EPSILON_SYMBOL_@";

/// Remove every occurrence of the epsilon marker from `s`.
///
/// Plain substring removal, not token-aware segmentation.
pub fn strip_epsilons(s: &str) -> String {
    s.replace(EPSILON_SYMBOL, "")
}
