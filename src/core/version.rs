/// Check if version `a` is greater than or equal to version `b`
pub fn is_version_gte(a: &str, b: &str) -> bool {
    parse_version(a) >= parse_version(b)
}

/// Parse version string into [major, minor, patch]
///
/// Missing or non-numeric components count as zero, and anything after the
/// leading digits of a component (`0-beta.1`) is ignored.
pub fn parse_version(version: &str) -> [u32; 3] {
    let normalized = version.trim().trim_start_matches('v');
    let mut parts = normalized.split('.').map(leading_number);

    [
        parts.next().flatten().unwrap_or(0),
        parts.next().flatten().unwrap_or(0),
        parts.next().flatten().unwrap_or(0),
    ]
}

fn leading_number(part: &str) -> Option<u32> {
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    part[..end].parse().ok()
}
