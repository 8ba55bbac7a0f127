// SPDX-License-Identifier: LGPL-3.0-only
//! Human-readable formatting of entry metadata.

use chrono::{DateTime, Local};
use humansize::{format_size, BINARY};
use std::time::SystemTime;

/// Format a byte count, e.g. `1.50 KiB`.
pub fn filesize_to_string(size: u64) -> String {
    format_size(size, BINARY)
}

/// Format Unix permission bits as `rwxr-xr-x`.
pub fn permissions_to_string(mode: u32) -> String {
    const BITS: [(u32, char); 9] = [
        (0o400, 'r'),
        (0o200, 'w'),
        (0o100, 'x'),
        (0o040, 'r'),
        (0o020, 'w'),
        (0o010, 'x'),
        (0o004, 'r'),
        (0o002, 'w'),
        (0o001, 'x'),
    ];

    BITS.iter()
        .map(|&(bit, c)| if mode & bit != 0 { c } else { '-' })
        .collect()
}

/// Format a timestamp in local time as `YYYY-MM-DD HH:MM:SS`.
pub fn datetime_to_string(time: SystemTime) -> String {
    let dt: DateTime<Local> = time.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_to_string() {
        assert_eq!(permissions_to_string(0o755), "rwxr-xr-x");
        assert_eq!(permissions_to_string(0o640), "rw-r-----");
        assert_eq!(permissions_to_string(0), "---------");
        assert_eq!(permissions_to_string(0o4777), "rwxrwxrwx");
    }

    #[test]
    fn test_filesize_to_string() {
        assert_eq!(filesize_to_string(0), "0 B");
        assert_eq!(filesize_to_string(1024), "1 KiB");
    }

    #[test]
    fn test_datetime_shape() {
        let s = datetime_to_string(SystemTime::now());
        assert_eq!(s.len(), 19);
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[10..11], " ");
        assert_eq!(&s[13..14], ":");
    }
}
