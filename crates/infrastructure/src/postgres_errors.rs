use dealerdesk_core::AppError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Maps constraint violations to the validation errors the services report
/// from their own pre-checks; anything else is internal.
pub(crate) fn constraint_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error {
        let constraint = database_error.constraint().unwrap_or_default();

        match database_error.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                tracing::debug!(constraint, operation, "unique constraint rejected write");
                return AppError::Validation(unique_violation_message(constraint));
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                tracing::debug!(constraint, operation, "foreign key rejected write");
                return AppError::Validation(format!(
                    "cannot {operation}: related records still reference it"
                ));
            }
            _ => {}
        }
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}

fn unique_violation_message(constraint: &str) -> String {
    if constraint == "tenants_tax_id_key" {
        return "tax id is already in use by another tenant".to_owned();
    }
    if constraint == "sales_tenant_vehicle_key" {
        return "vehicle has already been sold".to_owned();
    }

    let field = [
        ("_tax_id_key", "tax id"),
        ("_email_key", "email"),
        ("_plate_key", "plate"),
        ("_chassis_key", "chassis"),
        ("_renavam_key", "renavam"),
        ("_account_key", "account"),
    ]
    .into_iter()
    .find_map(|(suffix, field)| constraint.ends_with(suffix).then_some(field))
    .unwrap_or("value");

    format!("{field} is already in use in this tenant")
}
