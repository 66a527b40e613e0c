// Host locale lookup, used when no browser is around to report one.

pub fn system_locale() -> String {
    sys_locale::get_locale().map_or("en-US".to_string(), |locale| locale.replace('_', "-"))
}
