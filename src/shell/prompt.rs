//! Prompt rendering.

/// `/ $ ` at the root, `~ $ ` at home, `<path> $ ` anywhere else.
pub fn render_prompt(cwd: &str, home: &str) -> String {
    if cwd == "/" {
        return "/ $ ".to_string();
    }
    if cwd == home {
        return "~ $ ".to_string();
    }
    format!("{} $ ", cwd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_root_home_and_other() {
        assert_eq!(render_prompt("/", "/home/user"), "/ $ ");
        assert_eq!(render_prompt("/home/user", "/home/user"), "~ $ ");
        assert_eq!(render_prompt("/home/user/docs", "/home/user"), "/home/user/docs $ ");
        assert_eq!(render_prompt("/etc", "/home/user"), "/etc $ ");
    }
}
