//! Shared fixture types for the integration suite.
//!
//! Hand-written `Describe` impls standing in for a service's payload model.
//! Fields are listed in declaration order, mirroring how a derived
//! implementation would emit them.

use chrono::{DateTime, Utc};
use routedoc::{Describe, FieldShape, ObjectShape, QualifiedName, Reflected, Route, TypeRegistry};

/// Registry covering the fixture namespace.
pub fn model_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register(["model"]);
    registry
}

/// `model.CreateUser` — request payload with tagged fields.
#[derive(Default)]
pub struct CreateUser {
    pub name: String,
    pub email: Option<String>,
}

impl Describe for CreateUser {
    fn qualified_name() -> QualifiedName {
        QualifiedName::from("model.CreateUser")
    }

    fn reflect(&self) -> Reflected {
        Reflected::Object(
            ObjectShape::new(Self::qualified_name())
                .with_field(
                    FieldShape::new("name", self.name.reflect())
                        .required()
                        .described("display name"),
                )
                .with_field(FieldShape::new("email", self.email.reflect()).described("contact")),
        )
    }

    fn reflect_zero() -> Reflected {
        Reflected::Object(
            ObjectShape::new(Self::qualified_name())
                .with_field(
                    FieldShape::new("name", String::reflect_zero())
                        .required()
                        .described("display name"),
                )
                .with_field(
                    FieldShape::new("email", Option::<String>::reflect_zero())
                        .described("contact"),
                ),
        )
    }
}

/// `model.User` — response payload with a nested owned object, an owned
/// array, and a date/time field.
#[derive(Default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub address: Option<Address>,
    pub orders: Vec<OrderRef>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Describe for User {
    fn qualified_name() -> QualifiedName {
        QualifiedName::from("model.User")
    }

    fn reflect(&self) -> Reflected {
        Reflected::Object(
            ObjectShape::new(Self::qualified_name())
                .with_field(FieldShape::new("id", self.id.reflect()).required())
                .with_field(FieldShape::new("name", self.name.reflect()).required())
                .with_field(FieldShape::new("address", self.address.reflect()))
                .with_field(FieldShape::new("orders", self.orders.reflect()).described("history"))
                .with_field(FieldShape::new("createdAt", self.created_at.reflect())),
        )
    }

    fn reflect_zero() -> Reflected {
        Reflected::Object(
            ObjectShape::new(Self::qualified_name())
                .with_field(FieldShape::new("id", i64::reflect_zero()).required())
                .with_field(FieldShape::new("name", String::reflect_zero()).required())
                .with_field(FieldShape::new("address", Option::<Address>::reflect_zero()))
                .with_field(
                    FieldShape::new("orders", Vec::<OrderRef>::reflect_zero()).described("history"),
                )
                .with_field(FieldShape::new(
                    "createdAt",
                    Option::<DateTime<Utc>>::reflect_zero(),
                )),
        )
    }
}

/// `model.Address` — nested owned object.
#[derive(Default)]
pub struct Address {
    pub street: String,
    pub city: String,
}

impl Describe for Address {
    fn qualified_name() -> QualifiedName {
        QualifiedName::from("model.Address")
    }

    fn reflect(&self) -> Reflected {
        Reflected::Object(
            ObjectShape::new(Self::qualified_name())
                .with_field(FieldShape::new("street", self.street.reflect()).required())
                .with_field(FieldShape::new("city", self.city.reflect()).required()),
        )
    }

    fn reflect_zero() -> Reflected {
        Reflected::Object(
            ObjectShape::new(Self::qualified_name())
                .with_field(FieldShape::new("street", String::reflect_zero()).required())
                .with_field(FieldShape::new("city", String::reflect_zero()).required()),
        )
    }
}

/// `model.OrderRef` — array element type.
#[derive(Default)]
pub struct OrderRef {
    pub order_id: i64,
}

impl Describe for OrderRef {
    fn qualified_name() -> QualifiedName {
        QualifiedName::from("model.OrderRef")
    }

    fn reflect(&self) -> Reflected {
        Reflected::Object(
            ObjectShape::new(Self::qualified_name())
                .with_field(FieldShape::new("orderId", self.order_id.reflect()).required()),
        )
    }

    fn reflect_zero() -> Reflected {
        Reflected::Object(
            ObjectShape::new(Self::qualified_name())
                .with_field(FieldShape::new("orderId", i64::reflect_zero()).required()),
        )
    }
}

/// Fully populated create-user route fixture.
pub fn create_user_route() -> Route {
    Route {
        description: "create a user".to_string(),
        path: "/users".to_string(),
        method: "POST".to_string(),
        is_query: false,
        service: "users".to_string(),
        request: Some(CreateUser::default().reflect()),
        response: Some(User::default().reflect()),
    }
}
