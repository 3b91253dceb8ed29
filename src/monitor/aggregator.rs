//! Snapshot aggregation: one consistent view of the rig per tick.

use crate::models::Snapshot;
use crate::monitor::{GatewayError, GpuGateway};

/// Capture a fresh [`Snapshot`] from the gateway.
///
/// No caching: every call re-queries the driver. Completes even when every
/// device reports unavailable power (`total_power_watts` is then 0.0).
pub fn capture<G: GpuGateway + ?Sized>(gateway: &mut G) -> Result<Snapshot, GatewayError> {
    let devices = gateway.list_devices()?;
    Ok(Snapshot::from_devices(devices))
}
