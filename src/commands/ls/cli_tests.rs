//! CLI parsing tests for ls command.

#[cfg(test)]
mod tests {
    crate::parses_to! {
        test_defaults_to_root: ["ls"] => Ls { path: "/" },
        test_with_path: ["ls", "/users/team"] => Ls { path: "/users/team" },
        test_with_hashed_value: ["ls", "/notes/body/xabc/0"] => Ls { path: "/notes/body/xabc/0" },
    }

    crate::rejects_args! {
        test_rejects_two_paths: ["ls", "/users", "/notes"],
    }
}
