/// Declare a constant holding the name of an environment variable.
#[macro_export]
macro_rules! env_var {
    ($name:ident) => {
        const $name: &'static str = stringify!($name);
    };
}

/// Load an environment variable into a validated newtype, failing with a
/// descriptive `anyhow` context. The caller must import `anyhow::Context`.
#[macro_export]
macro_rules! env_load {
    ($type:ident, $name:ident) => {
        $type::try_new(
            std::env::var($name)
                .with_context(|| format!("Missing {} env var", $name))?,
        )
        .with_context(|| format!("{} was not formatted right", $name))?
    };
    ($type:ident, $name:ident, $type_raw:ident) => {
        $type::try_new(
            std::env::var($name)
                .with_context(|| format!("Missing {} env var", $name))?
                .parse::<$type_raw>()
                .with_context(|| {
                    format!(
                        "{} env var cannot be parsed in the correct type",
                        $name
                    )
                })?,
        )
        .with_context(|| format!("{} was not formatted right", $name))?
    };
}

#[cfg(test)]
mod tests {
    use anyhow::{Context, Result};

    #[derive(Debug, PartialEq)]
    struct Port(u16);

    #[derive(Debug, thiserror::Error)]
    #[error("port must not be zero")]
    struct ZeroPort;

    impl Port {
        fn try_new(port: u16) -> Result<Self, ZeroPort> {
            if port == 0 {
                return Err(ZeroPort);
            }
            Ok(Port(port))
        }
    }

    env_var!(HELPER_TEST_PORT_OK);
    env_var!(HELPER_TEST_PORT_ZERO);
    env_var!(HELPER_TEST_PORT_MISSING);

    #[test]
    fn test_env_load_parses_and_validates() -> Result<()> {
        std::env::set_var(HELPER_TEST_PORT_OK, "8080");
        let port = (|| -> Result<Port> {
            Ok(env_load!(Port, HELPER_TEST_PORT_OK, u16))
        })()?;
        assert_eq!(port, Port(8080));
        Ok(())
    }

    #[test]
    fn test_env_load_rejects_invalid_value() {
        std::env::set_var(HELPER_TEST_PORT_ZERO, "0");
        let res = (|| -> Result<Port> {
            Ok(env_load!(Port, HELPER_TEST_PORT_ZERO, u16))
        })();
        let err = res.unwrap_err();
        assert!(err.to_string().contains("was not formatted right"));
    }

    #[test]
    fn test_env_load_missing() {
        std::env::remove_var(HELPER_TEST_PORT_MISSING);
        let res = (|| -> Result<Port> {
            Ok(env_load!(Port, HELPER_TEST_PORT_MISSING, u16))
        })();
        assert!(res.unwrap_err().to_string().contains("Missing"));
    }
}
