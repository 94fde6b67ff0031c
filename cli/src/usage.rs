/// Usage text printed for a malformed command line
pub fn usage(program: &str, reg_base: u32) -> String {
    let lines = [
        format!("{program} r <address>            :read address, decimal"),
        format!("{program} h <address>            :read address, hex"),
        format!("{program} b <address>            :read address, binary"),
        format!("{program} v <address>            :read address, verbose"),
        format!("{program} w <address> <value>    :write value to address"),
        format!("{program} s <address> <bitmask>  :setbits bitmask at address"),
        format!("{program} c <address> <bitmask>  :clear bits bitmask at address"),
    ];

    format!(
        "\n{}\n\n  <address> = absolute or offset from 0x{reg_base:08X}\n  \
         <bitmask> = bits to set or clear\n  \
         numbers are decimal, 0x hex, 0b binary, 0o or leading 0 octal\n\n",
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lists_every_command() {
        let text = usage("devmem", 0x1000_0000);
        for word in ["r", "h", "b", "v", "w", "s", "c"] {
            assert!(text.contains(&format!("devmem {word} <address>")), "missing '{word}'");
        }
        assert!(text.contains("offset from 0x10000000"));
        assert!(text.contains("leading 0 octal"));
        assert!(text.ends_with("\n\n"));
    }
}
