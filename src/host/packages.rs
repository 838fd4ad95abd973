use crate::host::tools::{run_powershell, run_tool, tool_available};
use crate::inventory::types::InstalledProduct;
use crate::inventory::FacilityError;

/// Package managers able to list installed products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSource {
    WindowsInstaller,
    Dpkg,
    Rpm,
}

impl ProductSource {
    pub fn detect() -> Option<ProductSource> {
        if cfg!(windows) {
            return crate::host::tools::powershell_available().then_some(ProductSource::WindowsInstaller);
        }
        if cfg!(target_os = "linux") {
            if tool_available("dpkg-query", &["--version"]) {
                return Some(ProductSource::Dpkg);
            }
            if tool_available("rpm", &["--version"]) {
                return Some(ProductSource::Rpm);
            }
        }
        None
    }

    pub fn list(self) -> Result<Vec<InstalledProduct>, FacilityError> {
        let output = match self {
            ProductSource::WindowsInstaller => run_powershell(
                "Get-CimInstance -ClassName Win32_Product | ForEach-Object { \"$($_.Name)`t$($_.Version)\" }",
            )?,
            ProductSource::Dpkg => run_tool("dpkg-query", &["-W", "-f=${Package}\\t${Version}\\n"])?,
            ProductSource::Rpm => run_tool("rpm", &["-qa", "--qf", "%{NAME}\\t%{VERSION}-%{RELEASE}\\n"])?,
        };
        Ok(parse_product_lines(&output))
    }
}

/// Parse `name<TAB>version` lines; the version column is optional.
pub fn parse_product_lines(output: &str) -> Vec<InstalledProduct> {
    output
        .lines()
        .filter_map(|line| {
            let (name, version) = match line.split_once('\t') {
                Some((name, version)) => (name.trim(), version.trim()),
                None => (line.trim(), ""),
            };
            if name.is_empty() {
                return None;
            }
            Some(InstalledProduct {
                name: name.to_string(),
                version: (!version.is_empty()).then(|| version.to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_lines() {
        let output = "7-Zip 23.01 (x64 edition)\t23.01.00.0\r\nMicrosoft Edge\t\r\n\r\n\t1.0\r\nlibc6\n";
        let products = parse_product_lines(output);
        assert_eq!(
            products,
            vec![
                InstalledProduct { name: "7-Zip 23.01 (x64 edition)".to_string(), version: Some("23.01.00.0".to_string()) },
                InstalledProduct { name: "Microsoft Edge".to_string(), version: None },
                InstalledProduct { name: "libc6".to_string(), version: None },
            ]
        );
    }
}
