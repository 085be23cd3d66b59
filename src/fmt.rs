// Logging goes out over defmt on the board. Host builds have no global
// logger, so there the macros only borrow their arguments and vanish.

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(target_os = "none")]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(not(target_os = "none"))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(target_os = "none")]
        ::defmt::info!($s $(, $x)*);
        #[cfg(not(target_os = "none"))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(target_os = "none")]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(not(target_os = "none"))]
        let _ = ($( & $x ),*);
    }};
}
