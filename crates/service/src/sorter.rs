//! Deterministic route ranking
//!
//! Routes order by exact fee total, then estimated time, then hop count,
//! then id. Fee totals compare as arbitrary-precision integers; when
//! either side fails to parse, the fee criterion is skipped and the
//! later tie-breakers decide.

use std::cmp::Ordering;

use bridge_types::fees;
use bridge_types::NormalizedRoute;

/// Sort routes into ranked order.
///
/// The sort is stable, so routes equal under every criterion keep their
/// arrival order, and the full ordering is independent of provider
/// response timing.
///
/// Totals produced by normalization always parse, and batches sorted here
/// must keep that property: comparisons skip the fee criterion when either
/// side fails to parse, so a batch mixing parseable with unparseable
/// totals has no transitive order and can panic the sort.
pub fn sort_routes(mut routes: Vec<NormalizedRoute>) -> Vec<NormalizedRoute> {
	routes.sort_by(compare_routes);
	routes
}

fn compare_routes(a: &NormalizedRoute, b: &NormalizedRoute) -> Ordering {
	if let (Some(fee_a), Some(fee_b)) = (
		fees::parse_fee(&a.total_fees),
		fees::parse_fee(&b.total_fees),
	) {
		let by_fee = fee_a.cmp(&fee_b);
		if by_fee != Ordering::Equal {
			return by_fee;
		}
	}

	a.estimated_time_secs
		.cmp(&b.estimated_time_secs)
		.then_with(|| a.hops.len().cmp(&b.hops.len()))
		.then_with(|| a.id.cmp(&b.id))
}
