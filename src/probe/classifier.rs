//! Status code classification

use crate::core::constants::display;
use crate::core::types::{OutcomeKind, ProbeOutcome};

/// Map a terminal HTTP status to its outcome kind.
///
/// Pure and total: any code outside the known classes is `Unknown`.
/// Timeouts and transport errors never reach this function, they have
/// no status to classify.
pub fn classify(status_code: u16) -> OutcomeKind {
    match status_code {
        200..=299 => OutcomeKind::Success,
        300..=399 => OutcomeKind::Redirect,
        400..=499 => OutcomeKind::ClientError,
        500.. => OutcomeKind::ServerError,
        _ => OutcomeKind::Unknown,
    }
}

/// Icon for a status class, as shown in tables and the distribution.
pub fn status_icon(kind: OutcomeKind) -> &'static str {
    match kind {
        OutcomeKind::Success => display::SUCCESS_ICON,
        OutcomeKind::Redirect => display::REDIRECT_ICON,
        OutcomeKind::ClientError => display::CLIENT_ERROR_ICON,
        OutcomeKind::ServerError => display::SERVER_ERROR_ICON,
        OutcomeKind::Timeout | OutcomeKind::TransportError | OutcomeKind::Unknown => {
            display::OTHER_ICON
        }
    }
}

/// Icon for an outcome
pub fn outcome_icon(outcome: &ProbeOutcome) -> &'static str {
    status_icon(outcome.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_ranges() {
        assert_eq!(classify(204), OutcomeKind::Success);
        assert_eq!(classify(301), OutcomeKind::Redirect);
        assert_eq!(classify(404), OutcomeKind::ClientError);
        assert_eq!(classify(503), OutcomeKind::ServerError);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(200), OutcomeKind::Success);
        assert_eq!(classify(299), OutcomeKind::Success);
        assert_eq!(classify(300), OutcomeKind::Redirect);
        assert_eq!(classify(399), OutcomeKind::Redirect);
        assert_eq!(classify(400), OutcomeKind::ClientError);
        assert_eq!(classify(499), OutcomeKind::ClientError);
        assert_eq!(classify(500), OutcomeKind::ServerError);
        assert_eq!(classify(999), OutcomeKind::ServerError);
    }

    #[test]
    fn test_classify_unknown_codes() {
        assert_eq!(classify(0), OutcomeKind::Unknown);
        assert_eq!(classify(100), OutcomeKind::Unknown);
        assert_eq!(classify(199), OutcomeKind::Unknown);
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(status_icon(OutcomeKind::Success), "🟢");
        assert_eq!(status_icon(OutcomeKind::Redirect), "🟡");
        assert_eq!(status_icon(OutcomeKind::ClientError), "🟠");
        assert_eq!(status_icon(OutcomeKind::ServerError), "🔴");
        assert_eq!(status_icon(OutcomeKind::Timeout), "⚪");
        assert_eq!(status_icon(OutcomeKind::Unknown), "⚪");
    }

    #[test]
    fn test_outcome_icon_for_failure() {
        let outcome = ProbeOutcome::timeout("http://slow.test", "timed out");
        assert_eq!(outcome_icon(&outcome), "⚪");
    }
}
