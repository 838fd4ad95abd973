use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use smbioslib::{DefinedStruct, SMBiosData};
use tracing::debug;

use crate::host::tools::run_powershell;
use crate::inventory::FacilityError;

const DMI_TABLE: &str = "/sys/firmware/dmi/tables/DMI";
const DMI_PRODUCT_SERIAL: &str = "/sys/class/dmi/id/product_serial";

/// Placeholder strings vendors leave in unset DMI fields.
const PLACEHOLDERS: [&str; 6] = [
    "Not Specified",
    "Not Available",
    "To Be Filled By O.E.M.",
    "Default string",
    "System Serial Number",
    "0",
];

/// Where the Linux firmware tables live.
#[derive(Debug, Clone)]
pub struct DmiSources {
    pub table: PathBuf,
    pub product_serial: PathBuf,
}

impl Default for DmiSources {
    fn default() -> Self {
        DmiSources {
            table: PathBuf::from(DMI_TABLE),
            product_serial: PathBuf::from(DMI_PRODUCT_SERIAL),
        }
    }
}

impl DmiSources {
    /// True when the current user can open either source.
    pub fn readable(&self) -> bool {
        is_readable(&self.table) || is_readable(&self.product_serial)
    }

    pub fn read_serial(&self) -> Result<Option<String>, FacilityError> {
        match serial_from_smbios(&self.table) {
            Ok(Some(serial)) => return Ok(Some(serial)),
            Ok(None) => {}
            Err(e) => debug!(error = %e, "SMBIOS table unreadable, trying sysfs"),
        }

        match fs::read_to_string(&self.product_serial) {
            Ok(serial) => Ok(clean_serial(&serial)),
            Err(e) if matches!(e.kind(), ErrorKind::PermissionDenied | ErrorKind::NotFound) => {
                debug!(path = %self.product_serial.display(), error = %e, "no readable firmware serial");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn is_readable(path: &Path) -> bool {
    fs::File::open(path).is_ok()
}

pub fn firmware_serial_available() -> bool {
    if cfg!(windows) {
        return crate::host::tools::powershell_available();
    }
    cfg!(target_os = "linux") && DmiSources::default().readable()
}

pub fn read_firmware_serial() -> Result<Option<String>, FacilityError> {
    if cfg!(windows) {
        let output = run_powershell("(Get-CimInstance -ClassName Win32_BIOS).SerialNumber")?;
        return Ok(clean_serial(&output));
    }
    DmiSources::default().read_serial()
}

fn serial_from_smbios(table: &Path) -> Result<Option<String>, FacilityError> {
    // Try to load SMBIOS data from the system
    let smbios_data = match SMBiosData::try_load_from_file(&table.to_string_lossy(), None) {
        Ok(data) => data,
        Err(_) => SMBiosData::from_vec_and_version(fs::read(table)?, None),
    };

    let mut system_serial = None;
    let mut chassis_serial = None;

    for structure in smbios_data.iter() {
        match structure.defined_struct() {
            DefinedStruct::SystemInformation(system_struct) => {
                system_serial = system_struct
                    .serial_number()
                    .to_utf8_lossy()
                    .and_then(|s| clean_serial(&s));
            }
            DefinedStruct::SystemChassisInformation(chassis_struct) => {
                chassis_serial = chassis_struct
                    .serial_number()
                    .to_utf8_lossy()
                    .and_then(|s| clean_serial(&s));
            }
            _ => continue,
        }
    }

    Ok(system_serial.or(chassis_serial))
}

/// Trim and drop empty or placeholder serials.
pub fn clean_serial(raw: &str) -> Option<String> {
    let serial = raw.trim();
    if serial.is_empty() || PLACEHOLDERS.iter().any(|p| serial.eq_ignore_ascii_case(p)) {
        return None;
    }
    Some(serial.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_serial() {
        assert_eq!(clean_serial("  5CG1234XYZ\r\n"), Some("5CG1234XYZ".to_string()));
        assert_eq!(clean_serial("To Be Filled By O.E.M."), None);
        assert_eq!(clean_serial("default string"), None);
        assert_eq!(clean_serial("\n"), None);
    }

    fn sources_in(dir: &Path) -> DmiSources {
        DmiSources {
            table: dir.join("DMI"),
            product_serial: dir.join("product_serial"),
        }
    }

    #[test]
    fn test_missing_tables_are_not_readable() {
        let dir = tempfile::tempdir().unwrap();
        let sources = sources_in(dir.path());

        assert!(!sources.readable());
        assert_eq!(sources.read_serial().unwrap(), None);
    }

    #[test]
    fn test_serial_read_from_sysfs_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let sources = sources_in(dir.path());
        fs::write(&sources.product_serial, "PF2ABCDE\n").unwrap();

        assert!(sources.readable());
        assert_eq!(sources.read_serial().unwrap(), Some("PF2ABCDE".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_root_only_tables_are_not_available() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let sources = sources_in(dir.path());
        for path in [&sources.table, &sources.product_serial] {
            fs::write(path, "secret").unwrap();
            fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
        }

        // Root reads anything; nothing to check there
        if fs::File::open(&sources.product_serial).is_ok() {
            return;
        }

        assert!(!sources.readable());
        assert_eq!(sources.read_serial().unwrap(), None);
    }
}
