use bitflags::bitflags;

bitflags! {
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ZigzagOptions: u64 {
        /// Are we on light theme?
        const LightTheme = 1 << 0;

        /// Debug overlay, frame stats
        const Debug = 1 << 1;
    }
}

impl Default for ZigzagOptions {
    fn default() -> Self {
        ZigzagOptions::empty()
    }
}
