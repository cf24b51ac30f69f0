#![forbid(unsafe_code)]

pub mod help;


#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub enum TzdataAction {
    #[default]
    Run,
    Help,
    Version,
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct TzdataOptions {
    pub action: TzdataAction,
}

type OptionSetter = fn(&mut TzdataOptions);

struct TzdataOption {
    short: char,
    long: &'static str,
    set: OptionSetter,
}

impl TzdataOptions {
    const TZDATA_OPTIONS: &'static [TzdataOption] = &[
        TzdataOption {
            short: 'h',
            long: "help",
            set: |options| options.action = TzdataAction::Help,
        },
        TzdataOption {
            short: 'V',
            long: "version",
            set: |options| options.action = TzdataAction::Version,
        },
    ];

    pub fn from_env() -> Result<TzdataOptions, String> {
        Self::try_parse_from(std::env::args())
    }

    /// The update itself takes no arguments; only help and version flags are understood.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut options = TzdataOptions::default();
        // the first argument is the program name - so we can skip it
        let arg_iter = iter.into_iter().map(Into::into).skip(1);

        for arg in arg_iter {
            if let Some(long) = arg.strip_prefix("--") {
                if let Some((key, _)) = long.split_once('=') {
                    if Self::TZDATA_OPTIONS.iter().any(|o| o.long == key) {
                        return Err(format!("'--{key}' does not take any arguments"));
                    }
                    return Err(format!("unrecognized option '{arg}'"));
                }
                let option = Self::TZDATA_OPTIONS
                    .iter()
                    .find(|o| o.long == long)
                    .ok_or_else(|| format!("unrecognized option '{arg}'"))?;
                (option.set)(&mut options);
            } else if let Some(flags) = arg.strip_prefix('-').filter(|f| !f.is_empty()) {
                // flags can be grouped, so we loop over the characters
                for flag in flags.chars() {
                    let option = Self::TZDATA_OPTIONS
                        .iter()
                        .find(|o| o.short == flag)
                        .ok_or_else(|| format!("invalid option -- '{flag}'"))?;
                    (option.set)(&mut options);
                }
            } else {
                return Err(format!("unexpected argument '{arg}'"));
            }
        }

        Ok(options)
    }
}
