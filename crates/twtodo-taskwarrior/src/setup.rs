//! One-time setup of the identity UDAs.

use tracing::info;
use twtodo_core::IDENTITY_ATTRIBUTES;

use crate::error::StoreError;
use crate::store::LocalStore;

/// Make sure both identity UDAs are defined, creating only the missing ones.
///
/// Returns the names of the UDAs that had to be created. Running it again
/// after success creates nothing.
pub async fn ensure_identity_attributes(store: &dyn LocalStore) -> Result<Vec<String>, StoreError> {
    let mut created = Vec::new();

    for (name, label) in IDENTITY_ATTRIBUTES {
        if store.uda_exists(name).await? {
            info!(uda = %name, "UDA already defined");
            continue;
        }

        info!(uda = %name, "Creating UDA");
        store.create_uda(name, label).await?;

        if !store.uda_exists(name).await? {
            return Err(StoreError::UdaNotCreated(name.to_string()));
        }
        created.push(name.to_string());
    }

    Ok(created)
}
