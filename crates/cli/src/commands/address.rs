//! Address book commands.

use std::error::Error;

use merchstand_core::AddressId;
use merchstand_storefront::services::AddressInput;
use merchstand_storefront::shop::Shop;

/// Save a new address.
pub fn add(shop: &Shop, input: AddressInput) -> Result<(), Box<dyn Error>> {
    let make_default = input.make_default;
    let address = shop.profile().add_address(input)?;
    println!("Saved address {}.", address.id);
    if make_default {
        println!("It is now your default address.");
    }
    Ok(())
}

/// List saved addresses.
pub fn list(shop: &Shop) -> Result<(), Box<dyn Error>> {
    let profile = shop.profile();
    let addresses = profile.addresses()?;
    if addresses.is_empty() {
        println!("No saved addresses.");
        return Ok(());
    }

    let default_id = shop
        .accounts()
        .current_user()?
        .and_then(|user| user.default_address_id);
    for address in addresses {
        let marker = if default_id.as_ref() == Some(&address.id) {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {}{marker}\n    {}, {}, {}, {} {}, {}",
            address.id,
            address.name,
            address.address,
            address.city,
            address.state,
            address.zip,
            address.country
        );
        if let Some(phone) = &address.phone {
            println!("    {phone}");
        }
    }
    Ok(())
}

/// Delete a saved address.
pub fn remove(shop: &Shop, id: &str) -> Result<(), Box<dyn Error>> {
    shop.profile().delete_address(&AddressId::new(id))?;
    println!("Deleted address {id}.");
    Ok(())
}

/// Mark a saved address as the default.
pub fn set_default(shop: &Shop, id: &str) -> Result<(), Box<dyn Error>> {
    shop.profile().set_default_address(&AddressId::new(id))?;
    println!("Default address set to {id}.");
    Ok(())
}
