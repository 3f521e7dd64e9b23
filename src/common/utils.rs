use regex::Regex;
use std::path::PathBuf;

pub struct FormatTool;

impl FormatTool {
    // 格式化时长
    pub fn format_duration(duration: f64) -> String {
        let hours = (duration / 3600.0).floor() as u32;
        let mins = ((duration - (hours * 3600) as f64) / 60.0).floor() as u32;
        let secs = (duration - (hours * 3600 + mins * 60) as f64).round() as u32;

        if hours != 0 {
            format!("{:02}:{:02}:{:02}", hours, mins, secs)
        } else {
            format!("{:02}:{:02}", mins, secs)
        }
    }

    // 格式化文件大小
    pub fn format_size(size: u64) -> String {
        if size == 0 {
            "0 MB".to_string()
        } else if size > 1024 * 1024 * 1024 {
            format!("{:.2} GB", size as f64 / 1024.0 / 1024.0 / 1024.0)
        } else if size > 1024 * 1024 {
            format!("{:.1} MB", size as f64 / 1024.0 / 1024.0)
        } else {
            format!("{:.1} KB", size as f64 / 1024.0)
        }
    }
}

// 清理标题中不能出现在文件名里的字符
pub fn sanitize_filename(name: &str) -> String {
    let re = Regex::new(r#"[/\\:*?"<>|]"#).unwrap();
    let cleaned = re.replace_all(name.trim(), "_");
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == ' ');

    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned.to_string()
    }
}

// 如果目标文件已存在，追加数字后缀生成唯一路径
pub fn unique_path(path: PathBuf) -> PathBuf {
    if !path.exists() {
        return path;
    }

    let mut counter = 1;
    loop {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        let new_name = if ext.is_empty() {
            format!("{}_{}", stem, counter)
        } else {
            format!("{}_{}.{}", stem, counter, ext)
        };
        let new_path = path.with_file_name(new_name);
        if !new_path.exists() {
            return new_path;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(FormatTool::format_duration(0.0), "00:00");
        assert_eq!(FormatTool::format_duration(75.0), "01:15");
        assert_eq!(FormatTool::format_duration(3661.0), "01:01:01");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FormatTool::format_size(0), "0 MB");
        assert_eq!(FormatTool::format_size(2048), "2.0 KB");
        assert_eq!(FormatTool::format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("正常标题"), "正常标题");
        assert_eq!(sanitize_filename("a/b\\c:d*e?f\"g<h>i|j"), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_filename("  带空格的标题  "), "带空格的标题");
        assert_eq!(sanitize_filename("..."), "untitled");
        assert_eq!(sanitize_filename(""), "untitled");
    }

    #[test]
    fn test_unique_path() {
        let dir = tempfile::tempdir().unwrap();

        // 不存在时原样返回
        let fresh = dir.path().join("a.mp4");
        assert_eq!(unique_path(fresh.clone()), fresh);

        // 已存在时追加后缀
        std::fs::write(&fresh, b"x").unwrap();
        assert_eq!(unique_path(fresh.clone()), dir.path().join("a_1.mp4"));

        std::fs::write(dir.path().join("a_1.mp4"), b"x").unwrap();
        assert_eq!(unique_path(fresh), dir.path().join("a_2.mp4"));
    }
}
