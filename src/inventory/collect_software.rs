use crate::inventory::platform::{FacilityError, Platform};
use crate::inventory::types::{Entry, InstalledProduct};

pub const UNSUPPORTED: &str = "unsupported on this platform";
pub const NONE_FOUND: &str = "none found";

fn describe(product: &InstalledProduct) -> String {
    match product.version.as_deref().filter(|v| !v.is_empty()) {
        Some(version) => format!("{} ({})", product.name, version),
        None => product.name.clone(),
    }
}

/// Installed products joined into a single value. Not capped.
pub fn collect_installed_software<P: Platform + ?Sized>(platform: &P) -> Result<Vec<Entry>, FacilityError> {
    if !platform.capabilities().product_inventory {
        return Ok(vec![Entry::new("Installed Programs", UNSUPPORTED)]);
    }

    let products = platform.installed_products()?;
    let value = if products.is_empty() {
        NONE_FOUND.to_string()
    } else {
        products.iter().map(describe).collect::<Vec<_>>().join("; ")
    };

    Ok(vec![Entry::new("Installed Programs", value)])
}

pub fn collect_usb_devices<P: Platform + ?Sized>(platform: &P) -> Result<Vec<Entry>, FacilityError> {
    if !platform.capabilities().bus_enumeration {
        return Ok(vec![Entry::new("USB Count", UNSUPPORTED)]);
    }

    let hubs = platform.usb_hub_count()?;
    Ok(vec![Entry::new("USB Device/Port Count", hubs.to_string())])
}
