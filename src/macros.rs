#[macro_export]
#[cfg(all(debug_assertions, not(test)))]
macro_rules! debug_println {
    ($($arg:tt)*) => ({
        use cortex_m_semihosting::hprintln;
        hprintln!($($arg)*).unwrap();
    });
}

#[macro_export]
#[cfg(any(not(debug_assertions), test))]
macro_rules! debug_println {
    ($($arg:tt)*) => {{}};
}
