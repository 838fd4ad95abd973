use std::fs;
use std::path::Path;

use crate::host::tools::run_powershell;
use crate::inventory::FacilityError;

const SYS_USB_DEVICES: &str = "/sys/bus/usb/devices";
const USB_CLASS_HUB: &str = "09";

pub fn usb_enumeration_available() -> bool {
    if cfg!(windows) {
        return crate::host::tools::powershell_available();
    }
    cfg!(target_os = "linux") && Path::new(SYS_USB_DEVICES).is_dir()
}

pub fn count_usb_hubs() -> Result<usize, FacilityError> {
    if cfg!(windows) {
        let output = run_powershell("(Get-CimInstance -ClassName Win32_USBHub | Measure-Object).Count")?;
        return output
            .trim()
            .parse::<usize>()
            .map_err(|e| FacilityError::Lookup(format!("unexpected Win32_USBHub count {:?}: {}", output.trim(), e)));
    }
    count_hubs_in(Path::new(SYS_USB_DEVICES))
}

/// Count devices under a sysfs USB tree whose device class is "hub".
pub fn count_hubs_in(devices_dir: &Path) -> Result<usize, FacilityError> {
    let mut hubs = 0;
    for entry in fs::read_dir(devices_dir)?.flatten() {
        let class = fs::read_to_string(entry.path().join("bDeviceClass"))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if class == USB_CLASS_HUB {
            hubs += 1;
        }
    }
    Ok(hubs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_hubs_in_sysfs_tree() {
        let dir = tempfile::tempdir().unwrap();
        for (name, class) in [("usb1", "09\n"), ("usb2", "09\n"), ("1-1", "00\n"), ("1-1.0", "")] {
            let dev = dir.path().join(name);
            fs::create_dir(&dev).unwrap();
            if !class.is_empty() {
                fs::write(dev.join("bDeviceClass"), class).unwrap();
            }
        }

        assert_eq!(count_hubs_in(dir.path()).unwrap(), 2);
    }

    #[test]
    fn test_missing_tree_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(count_hubs_in(&dir.path().join("absent")).is_err());
    }
}
