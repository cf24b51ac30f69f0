pub(crate) const USAGE_MSG: &str = "usage: update-tzdata [-hV]";

const DESCRIPTOR: &str = "update-tzdata - regenerate Android's time zone data from the IANA release in
system/timezone/input_data/iana";

const HELP_MSG: &str = "Options:
  -h, --help               display help message and exit
  -V, --version            display version information and exit

Environment:
  ANDROID_BUILD_TOP        root of the Android checkout (required)
  TZDATA_ZIC, TZDATA_JAVAC, TZDATA_JAVA, TZDATA_MAKE
                           override the external programs that are run
";

pub(crate) fn long_help_message() -> String {
    format!("{USAGE_MSG}\n\n{DESCRIPTOR}\n\n{HELP_MSG}")
}
