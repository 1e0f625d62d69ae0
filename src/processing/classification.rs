//! Status classification for attendance cells and leave reasons.
//!
//! Both functions use case-insensitive substring rules checked in a fixed
//! order; the first matching rule wins.

use crate::models::{AbsenceType, Authorization};

/// Type rules, in priority order.
const TYPE_RULES: &[(&[&str], AbsenceType)] = &[
    (&["sick"], AbsenceType::Sick),
    (&["pto", "leave"], AbsenceType::Pto),
    (&["holiday"], AbsenceType::Holiday),
    (&["no show", "no call"], AbsenceType::NoShowNoCall),
    (&["offboard"], AbsenceType::Offboarded),
    (&["emergency"], AbsenceType::Emergency),
    (&["funeral"], AbsenceType::Funeral),
];

/// Authorization rules, in priority order.
///
/// "leave" is deliberately absent: it classifies as PTO but does not by
/// itself say whether the leave was approved.
const AUTHORIZATION_RULES: &[(&[&str], Authorization)] = &[
    (
        &["sick", "pto", "holiday", "emergency", "funeral"],
        Authorization::Authorized,
    ),
    (
        &["no show", "no call", "offboard"],
        Authorization::Unauthorized,
    ),
];

fn first_match<T: Copy>(status: &str, rules: &[(&[&str], T)]) -> Option<T> {
    let status = status.to_lowercase();
    rules
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| status.contains(n)))
        .map(|(_, value)| *value)
}

/// Classifies a status label into an [`AbsenceType`].
///
/// # Example
///
/// ```
/// use absence_engine::models::AbsenceType;
/// use absence_engine::processing::classify_status;
///
/// assert_eq!(classify_status("Sick"), AbsenceType::Sick);
/// assert_eq!(classify_status("Annual Leave"), AbsenceType::Pto);
/// assert_eq!(classify_status("NCNS"), AbsenceType::Other);
/// ```
pub fn classify_status(status: &str) -> AbsenceType {
    first_match(status, TYPE_RULES).unwrap_or(AbsenceType::Other)
}

/// Infers whether a status label describes an authorized absence.
///
/// # Example
///
/// ```
/// use absence_engine::models::Authorization;
/// use absence_engine::processing::infer_authorization;
///
/// assert_eq!(infer_authorization("PTO"), Authorization::Authorized);
/// assert_eq!(infer_authorization("No Show"), Authorization::Unauthorized);
/// assert_eq!(infer_authorization("Late"), Authorization::Unknown);
/// ```
pub fn infer_authorization(status: &str) -> Authorization {
    first_match(status, AUTHORIZATION_RULES).unwrap_or(Authorization::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_rule() {
        assert_eq!(classify_status("sick"), AbsenceType::Sick);
        assert_eq!(classify_status("PTO"), AbsenceType::Pto);
        assert_eq!(classify_status("Maternity Leave"), AbsenceType::Pto);
        assert_eq!(classify_status("Public Holiday"), AbsenceType::Holiday);
        assert_eq!(classify_status("No Show"), AbsenceType::NoShowNoCall);
        assert_eq!(classify_status("no call"), AbsenceType::NoShowNoCall);
        assert_eq!(classify_status("Offboarded"), AbsenceType::Offboarded);
        assert_eq!(classify_status("Family Emergency"), AbsenceType::Emergency);
        assert_eq!(classify_status("FUNERAL"), AbsenceType::Funeral);
    }

    #[test]
    fn test_classify_unmatched_is_other() {
        assert_eq!(classify_status("Late"), AbsenceType::Other);
        assert_eq!(classify_status(""), AbsenceType::Other);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // "sick" is checked before "leave".
        assert_eq!(classify_status("Sick Leave"), AbsenceType::Sick);
        // "leave" is checked before "emergency".
        assert_eq!(classify_status("Emergency Leave"), AbsenceType::Pto);
    }

    #[test]
    fn test_authorization_tri_state() {
        assert_eq!(infer_authorization("Sick"), Authorization::Authorized);
        assert_eq!(infer_authorization("Holiday"), Authorization::Authorized);
        assert_eq!(infer_authorization("Funeral"), Authorization::Authorized);
        assert_eq!(infer_authorization("NO CALL"), Authorization::Unauthorized);
        assert_eq!(infer_authorization("offboarding"), Authorization::Unauthorized);
        assert_eq!(infer_authorization("Other"), Authorization::Unknown);
    }

    #[test]
    fn test_leave_alone_is_not_authorized_or_unauthorized() {
        assert_eq!(classify_status("Leave"), AbsenceType::Pto);
        assert_eq!(infer_authorization("Leave"), Authorization::Unknown);
    }

    #[test]
    fn test_authorized_rule_checked_before_unauthorized() {
        assert_eq!(
            infer_authorization("Sick - no call"),
            Authorization::Authorized
        );
    }
}
