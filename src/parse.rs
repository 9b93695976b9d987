use std::path::Path;

use anyhow::{anyhow, Result};

pub fn path_to_string(path: &Path) -> Result<String> {
    match path.to_str() {
        Some(s) => Ok(s.to_string()),
        None => Err(anyhow!("Couldn't convert path to string.")),
    }
}

/// Strips the noise of program logs from an error message so only the
/// relevant line is shown to the user.
pub fn parse_candy_errors(msg: &str) -> String {
    let mut lines = msg
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("Program log:"));

    match msg.find("custom program error: ") {
        Some(position) => {
            let code = msg[position + "custom program error: ".len()..]
                .split_whitespace()
                .next()
                .unwrap_or_default();
            format!("Candy Machine program error {}", code)
        }
        None => lines.next().unwrap_or(msg).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_messages() {
        assert_eq!(parse_candy_errors("Keypair is required!"), "Keypair is required!");
    }

    #[test]
    fn extracts_custom_program_error_code() {
        let msg = "RPC response error -32002: Transaction simulation failed: Error processing Instruction 0: custom program error: 0x12f \nProgram log: something";
        assert_eq!(
            parse_candy_errors(msg),
            "Candy Machine program error 0x12f"
        );
    }
}
