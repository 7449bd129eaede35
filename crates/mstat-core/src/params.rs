use crate::criteria::{FilterCriteria, StatusFilter};

/// Builds the ordered query parameters for the status export endpoint.
///
/// Dates become UTC day bounds (`T00:00:00Z` / `T23:59:59Z`), `status` is
/// omitted for [`StatusFilter::All`], `shop_id` is omitted when blank, and
/// each identifier gets its own `provider_unique_identifier` pair. Date
/// ordering is not checked.
#[must_use]
pub fn build_params(criteria: &FilterCriteria) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(4 + criteria.identifiers.len());

    if let Some(since) = criteria.since {
        params.push(("updated_since", format!("{}T00:00:00Z", since.format("%Y-%m-%d"))));
    }
    if let Some(to) = criteria.to {
        params.push(("updated_to", format!("{}T23:59:59Z", to.format("%Y-%m-%d"))));
    }

    if criteria.status != StatusFilter::All {
        params.push(("status", criteria.status.as_str().to_string()));
    }

    if let Some(shop_id) = criteria.shop_id.as_deref().map(str::trim) {
        if !shop_id.is_empty() {
            params.push(("shop_id", shop_id.to_string()));
        }
    }

    for sku in &criteria.identifiers {
        params.push(("provider_unique_identifier", sku.clone()));
    }

    params
}
