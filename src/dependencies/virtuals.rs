// src/dependencies/virtuals.rs

//! Static virtual package aliases and preinstall classification

/// Virtual package names and the concrete package that satisfies them
pub const VIRTUAL_ALIASES: &[(&str, &str)] = &[
    ("awk", "mawk"),
    ("perl5", "perl"),
    ("perlapi-5.8.7", "perl-base"),
    ("perlapi-5.8.8", "perl-base"),
    ("mail-transport-agent", "postfix"),
    ("libapt-pkg-libc6.4-6-3.53", "apt"),
    ("aufs-modules", "aufs-modules-2.6.20-15-386"),
];

/// Packages whose names start with this must install before everything else
pub const PREINSTALL_PREFIX: &str = "linux-image";

/// Map a virtual package name to its concrete package
///
/// Names not in the alias table are returned unchanged.
pub fn resolve_virtual(name: &str) -> &str {
    VIRTUAL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |&(_, real)| real)
}

/// Whether a package has to be installed ahead of the general batch
pub fn is_preinstall(name: &str) -> bool {
    name.starts_with(PREINSTALL_PREFIX)
}
