use quote::quote;
use proc_macro::TokenStream;
use syn::DeriveInput;

pub fn impl_component(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;

    if !ast.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &ast.generics,
            "generic types cannot derive Component, each component needs a single runtime id",
        )
        .to_compile_error()
        .into();
    }

    // Scoped so every derived type gets its own id static, whatever its name.
    let gen = quote! {
        const _: () = {
            dalek_ecs::lazy_static! {
                static ref COMPONENT_ID: dalek_ecs::components::ComponentId =
                    dalek_ecs::components::ComponentId::register(stringify!(#name));
            }

            impl dalek_ecs::components::Component for #name {
                #[inline(always)]
                fn component_id() -> dalek_ecs::components::ComponentId {
                    *COMPONENT_ID
                }
            }
        };
    };
    gen.into()
}
