// ── Wire DTO → domain conversions ──
//
// All tolerance for the server's loose typing lives here: unknown enum
// strings fall back to safe defaults with a warning, missing display
// strings are synthesized from raw amounts.

use secrecy::SecretString;
use tracing::warn;

use tenra_api::types::{
    CategoryDto, CategoryPropertyDto, OrderDto, PriceDto, ProductDto, SignInData, StoreDto,
    StoreProductDto, StoreRefDto, UserDto,
};

use crate::model::{
    Category, CategoryProperty, EntityId, Order, OrderStatus, PaymentStatus, Price, Product,
    PropertyType, Session, Store, StoreProduct, StoreRef, User, UserRole,
};

// ── Categories ──────────────────────────────────────────────────────

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Self {
            id: dto.id.into(),
            name: dto.name,
            properties: dto.properties.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CategoryPropertyDto> for CategoryProperty {
    fn from(dto: CategoryPropertyDto) -> Self {
        let property_type = dto.property_type.parse().unwrap_or_else(|_| {
            warn!(property = %dto.name, kind = %dto.property_type, "unknown property type, treating as text");
            PropertyType::Text
        });
        Self {
            name: dto.name,
            property_type,
            options: dto.options.unwrap_or_default(),
        }
    }
}

impl From<&CategoryProperty> for CategoryPropertyDto {
    fn from(property: &CategoryProperty) -> Self {
        Self {
            name: property.name.clone(),
            property_type: property.property_type.to_string(),
            options: (!property.options.is_empty()).then(|| property.options.clone()),
        }
    }
}

// ── Prices and products ─────────────────────────────────────────────

impl From<PriceDto> for Price {
    fn from(dto: PriceDto) -> Self {
        let display = dto
            .display_price
            .unwrap_or_else(|| dto.amount.to_string());
        Self {
            amount: dto.amount,
            display,
            sale_amount: dto.sale_price,
            sale_display: dto.display_sale_price,
        }
    }
}

impl From<&Price> for PriceDto {
    fn from(price: &Price) -> Self {
        Self {
            amount: price.amount,
            display_price: Some(price.display.clone()),
            sale_price: price.sale_amount,
            display_sale_price: price.sale_display.clone(),
        }
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Self {
            id: dto.id.into(),
            upc: dto.upc,
            name: dto.name,
            price: dto.price.map(Into::into),
            category: dto.category.map(Into::into),
            description: dto.full_description,
            images: dto.image_paths.unwrap_or_default(),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

/// Store products carry no store id on the wire -- the listing is
/// already store-scoped -- so the caller supplies it from context.
pub(crate) fn store_product_from_dto(dto: StoreProductDto, store_id: &EntityId) -> StoreProduct {
    StoreProduct {
        id: dto.id.into(),
        store_id: store_id.clone(),
        product: dto.product.into(),
        inventory: dto.inventory,
        price_override: dto.price.map(Into::into),
    }
}

// ── Stores ──────────────────────────────────────────────────────────

impl From<StoreDto> for Store {
    fn from(dto: StoreDto) -> Self {
        Self {
            id: dto.id.into(),
            name: dto.name,
            code: dto.code,
            support_delivery: dto.support_delivery.unwrap_or(false),
            support_pickup: dto.support_pickup.unwrap_or(false),
            open_time: dto.open_time,
            close_time: dto.close_time,
            address: dto.address,
        }
    }
}

impl From<StoreRefDto> for StoreRef {
    fn from(dto: StoreRefDto) -> Self {
        Self {
            id: dto.id.into(),
            name: dto.name,
        }
    }
}

// ── Users and sessions ──────────────────────────────────────────────

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        let role = dto.role.parse().unwrap_or_else(|_| {
            warn!(username = %dto.username, role = %dto.role, "unknown role, treating as staff");
            UserRole::Staff
        });
        Self {
            id: dto.id.into(),
            username: dto.username,
            first_name: dto.first_name,
            last_name: dto.last_name,
            phone_number: dto.phone_number,
            email: dto.email,
            role,
            is_active: dto.is_active,
            store: dto.store.map(Into::into),
        }
    }
}

impl From<SignInData> for Session {
    fn from(data: SignInData) -> Self {
        Self {
            access_token: SecretString::from(data.access_token),
            user: data.user.into(),
            token_expired_time: data.token_expired_time,
        }
    }
}

// ── Orders ──────────────────────────────────────────────────────────

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        let status = dto.status.parse().unwrap_or_else(|_| {
            warn!(order = %dto.id, status = %dto.status, "unknown order status, treating as pending");
            OrderStatus::Pending
        });
        let payment_status = dto.payment_status.and_then(|raw| {
            raw.parse::<PaymentStatus>()
                .map_err(|_| warn!(order = %dto.id, payment = %raw, "unknown payment status"))
                .ok()
        });
        Self {
            id: dto.id.into(),
            status,
            payment_status,
            store: dto.store.map(Into::into),
            display_total: dto.display_total,
            created_at: dto.created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_property_type_falls_back_to_text() {
        let dto: CategoryPropertyDto =
            serde_json::from_value(json!({"name": "size", "type": "dropdown"})).unwrap();
        let property = CategoryProperty::from(dto);
        assert_eq!(property.property_type, PropertyType::Text);
    }

    #[test]
    fn price_display_falls_back_to_amount() {
        let dto: PriceDto = serde_json::from_value(json!({"price": 45000})).unwrap();
        let price = Price::from(dto);
        assert_eq!(price.display, "45000");
    }

    #[test]
    fn sign_in_data_becomes_session() {
        let data: SignInData = serde_json::from_value(json!({
            "accessToken": "tok",
            "id": 3,
            "username": "lan",
            "role": "manager",
            "store": {"id": 8, "name": "District 1"},
        }))
        .unwrap();
        let session = Session::from(data);
        assert!(session.is_authorized_for_manager());
        assert!(!session.is_authorized_for_admin());
        assert_eq!(session.user.store.as_ref().unwrap().id, EntityId::Int(8));
    }
}
