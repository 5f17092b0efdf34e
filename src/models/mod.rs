pub mod filter;
pub mod listing;

/// Query parameters of a request, kept sorted so that composed URLs are stable.
pub type QueryMap = std::collections::BTreeMap<String, String>;

pub(crate) mod macros {
    /// Generates one named method per [`Filter`] that forwards to `Request::filter`.
    ///
    /// [`Filter`]: crate::filter::Filter
    macro_rules! filter_methods {
        ($($(#[$doc:meta])* $name:ident => $filter:expr;)*) => {
            $(
                $(#[$doc])*
                ///
                /// # Errors
                ///
                /// Returns [`Error::FilterAlreadySet`] if a filter was already applied.
                ///
                /// [`Error::FilterAlreadySet`]: crate::error::Error::FilterAlreadySet
                pub fn $name(&mut self) -> crate::result::Result<&mut Self> {
                    self.filter($filter)
                }
            )*
        };
    }

    pub(crate) use filter_methods;
}
