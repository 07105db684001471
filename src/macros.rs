/// Declares the process-wide signal table in one place.
///
/// Expands to a `Globals` struct holding one `RwSignal` per entry, a lazily initialised
/// `globals()` accessor and one accessor function per signal:
///
/// `global_signals! {
///     pub derived_assets => derived_assets: Vec<AssetRecord> = Vec::new(),
/// }`
#[macro_export]
macro_rules! global_signals {
    ( $( $vis:vis $name:ident => $field:ident : $ty:ty = $init:expr ),+ $(,)? ) => {
        pub struct Globals {
            $( pub $field: ::leptos::RwSignal<$ty>, )+
        }

        static GLOBALS: ::once_cell::sync::OnceCell<Globals> = ::once_cell::sync::OnceCell::new();

        pub fn globals() -> &'static Globals {
            GLOBALS.get_or_init(|| Globals {
                $( $field: ::leptos::create_rw_signal($init), )+
            })
        }

        $(
            $vis fn $name() -> ::leptos::RwSignal<$ty> {
                globals().$field
            }
        )+
    };
}
