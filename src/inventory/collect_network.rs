use crate::inventory::platform::{FacilityError, Platform};
use crate::inventory::types::Entry;

pub fn collect_local_address<P: Platform + ?Sized>(platform: &P) -> Result<Vec<Entry>, FacilityError> {
    let ip = platform.resolve_local_ipv4()?;
    Ok(vec![Entry::new("Local IP Address", ip.to_string())])
}

/// One pair per IPv4 address and per MAC, interfaces sorted by name.
pub fn collect_interfaces<P: Platform + ?Sized>(platform: &P) -> Result<Vec<Entry>, FacilityError> {
    let mut interfaces = platform.interfaces()?;
    interfaces.sort_by(|a, b| a.name.cmp(&b.name));

    let mut entries = Vec::new();
    for iface in interfaces {
        for ip in &iface.ipv4 {
            entries.push(Entry::new(format!("Interface {} - IPv4", iface.name), ip.to_string()));
        }
        for mac in &iface.mac {
            entries.push(Entry::new(format!("Interface {} - MAC", iface.name), mac.clone()));
        }
    }

    Ok(entries)
}
