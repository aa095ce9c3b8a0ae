//! Unit tests for the opcode table

#[cfg(test)]
mod tests {
    use crate::luminary::opcodes::Opcode;

    #[test]
    fn test_ordinals_follow_yarn_enumeration() {
        assert_eq!(Opcode::from_ordinal(0), Some(Opcode::JumpTo));
        assert_eq!(Opcode::from_ordinal(7), Some(Opcode::PushFloat));
        assert_eq!(Opcode::from_ordinal(10), Some(Opcode::JumpIfFalse));
        assert_eq!(Opcode::from_ordinal(16), Some(Opcode::RunNode));
    }

    #[test]
    fn test_ordinal_round_trip() {
        for (i, opcode) in Opcode::ALL.iter().enumerate() {
            assert_eq!(opcode.ordinal(), i);
        }
    }

    #[test]
    fn test_unknown_ordinals() {
        assert_eq!(Opcode::from_ordinal(17), None);
        assert_eq!(Opcode::from_ordinal(-1), None);
        assert_eq!(Opcode::from_ordinal(i64::MAX), None);
    }

    #[test]
    fn test_names_parse() {
        assert_eq!("AddOption".parse::<Opcode>(), Ok(Opcode::AddOption));
        assert_eq!("StoreVariable".parse::<Opcode>(), Ok(Opcode::StoreVariable));
        assert!("addoption".parse::<Opcode>().is_err());
        assert!("Return".parse::<Opcode>().is_err());
    }

    #[test]
    fn test_push_float_uses_number_macro() {
        // The runtime has no float type
        assert_eq!(Opcode::PushFloat.mnemonic(), "YARN_PUSHNUMBER");
    }

    #[test]
    fn test_mnemonics_are_prefixed() {
        for opcode in Opcode::ALL {
            assert!(opcode.mnemonic().starts_with("YARN_"), "{}", opcode);
        }
    }
}
