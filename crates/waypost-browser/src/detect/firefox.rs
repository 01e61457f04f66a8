use std::path::{MAIN_SEPARATOR_STR, Path};
use waypost_core::config::DetectedProfile;

#[derive(Default)]
struct Section {
    is_profile: bool,
    name: Option<String>,
    path: Option<String>,
    is_relative: bool,
}

/// Read the profile list out of a Firefox `profiles.ini`
///
/// Only `[Profile*]` sections are used. Relative paths are resolved against
/// `profiles_dir`, the directory that holds the ini file.
pub fn parse_profiles_ini(
    executable: &str,
    content: &str,
    profiles_dir: &Path,
) -> Vec<DetectedProfile> {
    let mut results = Vec::new();
    let mut section = Section::default();

    for line in content.lines().map(str::trim) {
        if line.starts_with('[') {
            flush(&mut results, executable, profiles_dir, std::mem::take(&mut section));
            section.is_profile = line.to_lowercase().starts_with("[profile");
            section.is_relative = true;
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        if key.eq_ignore_ascii_case("Name") {
            section.name = Some(value.to_string());
        } else if key.eq_ignore_ascii_case("Path") {
            section.path = Some(value.to_string());
        } else if key.eq_ignore_ascii_case("IsRelative") {
            section.is_relative = value.trim() == "1";
        }
    }
    flush(&mut results, executable, profiles_dir, section);

    results
}

fn flush(results: &mut Vec<DetectedProfile>, executable: &str, profiles_dir: &Path, section: Section) {
    let (true, Some(name), Some(path)) = (section.is_profile, section.name, section.path) else {
        return;
    };

    let full_path = if section.is_relative {
        profiles_dir
            .join(path.replace('/', MAIN_SEPARATOR_STR))
            .to_string_lossy()
            .into_owned()
    } else {
        path
    };

    results.push(DetectedProfile {
        name: format!("Firefox - {}", name),
        executable: executable.to_string(),
        args: vec!["--profile".to_string(), full_path, "-no-remote".to_string()],
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const INI: &str = "[Install4F96D1932A9F858E]\r\n\
        Default=abcd.default-release\r\n\
        Locked=1\r\n\
        \r\n\
        [Profile1]\r\n\
        Name=default\r\n\
        IsRelative=1\r\n\
        Path=Profiles/xyz.default\r\n\
        \r\n\
        [Profile0]\r\n\
        Name=Work Stuff\r\n\
        IsRelative=0\r\n\
        Path=/data/firefox/work\r\n\
        Default=1\r\n\
        \r\n\
        [General]\r\n\
        StartWithLastProfile=1\r\n\
        Version=2\r\n";

    #[test]
    fn test_parse_profiles_ini() {
        let dir = Path::new("/home/me/.mozilla/firefox");
        let profiles = parse_profiles_ini("/usr/bin/firefox", INI, dir);

        assert_eq!(profiles.len(), 2);

        assert_eq!(profiles[0].name, "Firefox - default");
        let expected = dir.join("Profiles").join("xyz.default");
        assert_eq!(
            profiles[0].args,
            vec!["--profile", expected.to_str().unwrap(), "-no-remote"]
        );

        assert_eq!(profiles[1].name, "Firefox - Work Stuff");
        assert_eq!(profiles[1].args[1], "/data/firefox/work");
        assert_eq!(profiles[1].executable, "/usr/bin/firefox");
    }

    #[test]
    fn test_incomplete_sections_are_skipped() {
        let ini = "[Profile0]\nName=NoPath\n\n[Profile1]\nPath=no-name\n";
        assert!(parse_profiles_ini("firefox", ini, Path::new("/tmp")).is_empty());
    }

    #[test]
    fn test_non_profile_sections_ignored() {
        let ini = "[General]\nName=not-a-profile\nPath=nowhere\n";
        assert!(parse_profiles_ini("firefox", ini, Path::new("/tmp")).is_empty());
    }
}
