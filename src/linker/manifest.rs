use crate::config::PackagePolicy;
use crate::error::LinkError;
use crate::fragment::RequiredPackage;
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

/// Deduplicated third-party packages of a linked module, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManifest {
    packages: Vec<RequiredPackage>,
}

impl DependencyManifest {
    /// Groups `packages` by name. The first declared version/specifier pair of each
    /// package is kept; a later, different pin is logged or, under
    /// `PackagePolicy::Strict`, rejected.
    pub fn resolve(
        packages: &[RequiredPackage],
        policy: PackagePolicy,
    ) -> Result<Self, LinkError> {
        let mut grouped: IndexMap<&str, Vec<&RequiredPackage>> = IndexMap::new();
        for package in packages {
            grouped
                .entry(package.package_name.as_str())
                .or_default()
                .push(package);
        }

        let mut resolved = Vec::with_capacity(grouped.len());
        for (name, declarations) in grouped {
            let Some((first, rest)) = declarations.split_first() else {
                continue;
            };
            if let Some(conflict) = rest.iter().find(|other| pins_conflict(first, other)) {
                match policy {
                    PackagePolicy::Strict => {
                        return Err(LinkError::ConflictingPackagePins {
                            package: name.to_string(),
                            first: first.requirement(),
                            second: conflict.requirement(),
                        });
                    }
                    PackagePolicy::FirstWins => {
                        warn!(
                            package = name,
                            kept = first.requirement(),
                            dropped = conflict.requirement();
                            "Conflicting package pins, keeping the first"
                        );
                    }
                }
            }
            resolved.push((*first).clone());
        }
        Ok(Self { packages: resolved })
    }

    /// Combines manifests, keeping the first entry seen for every package name.
    pub fn merged<'a>(manifests: impl IntoIterator<Item = &'a DependencyManifest>) -> Self {
        let mut by_name: IndexMap<&str, &RequiredPackage> = IndexMap::new();
        for manifest in manifests {
            for package in &manifest.packages {
                by_name.entry(package.package_name.as_str()).or_insert(package);
            }
        }
        Self {
            packages: by_name.into_values().cloned().collect(),
        }
    }

    pub fn packages(&self) -> &[RequiredPackage] {
        &self.packages
    }

    pub fn get(&self, package_name: &str) -> Option<&RequiredPackage> {
        self.packages
            .iter()
            .find(|p| p.package_name == package_name)
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Renders the manifest in `requirements.txt` format, one package per line.
    pub fn to_requirements_txt(&self) -> String {
        self.packages
            .iter()
            .map(|p| format!("{}\n", p.requirement()))
            .collect()
    }
}

fn pins_conflict(first: &RequiredPackage, other: &RequiredPackage) -> bool {
    other.version.is_some()
        && first.version.is_some()
        && (first.version != other.version || first.specifier != other.specifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_manifests_keep_first_seen_order() {
        let first = DependencyManifest::resolve(
            &[RequiredPackage::pinned("requests", "2.31.0"), RequiredPackage::new("pydantic")],
            PackagePolicy::FirstWins,
        )
        .unwrap();
        let second = DependencyManifest::resolve(
            &[RequiredPackage::new("httpx"), RequiredPackage::pinned("requests", "1.0.0")],
            PackagePolicy::FirstWins,
        )
        .unwrap();

        let merged = DependencyManifest::merged([&first, &second]);
        assert_eq!(
            merged.to_requirements_txt(),
            "requests==2.31.0\npydantic\nhttpx\n"
        );
    }

    #[test]
    fn identical_pins_are_not_conflicts() {
        let pin = RequiredPackage::pinned("numpy", "1.26").with_specifier(">=");
        let manifest =
            DependencyManifest::resolve(&[pin.clone(), pin], PackagePolicy::Strict).unwrap();
        assert_eq!(manifest.len(), 1);
    }
}
