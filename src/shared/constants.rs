// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Citizen role - can submit and track infrastructure reports
pub const ROLE_CITIZEN: &str = "citizen";

/// Municipal admin role - can view the aggregated dashboard and manage reports
pub const ROLE_ADMIN: &str = "admin";
