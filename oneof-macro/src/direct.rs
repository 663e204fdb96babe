/// Walks syn nodes with the default traversal.
pub(crate) struct OneOfDirect;

impl<V> directed_visit::syn::direct::Full<V> for OneOfDirect where
    V: directed_visit::syn::visit::Full + ?Sized
{
}

impl<V> directed_visit::syn::direct::FullMut<V> for OneOfDirect where
    V: directed_visit::syn::visit::FullMut + ?Sized
{
}
