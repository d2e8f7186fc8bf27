//! Integer identifiers
//!
//! Every table is keyed by a 32-bit integer. Each key gets its own newtype so a
//! `CompanyId` can never be passed where a `UserId` is expected.

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(pub i32);

            impl From<i32> for $name {
                fn from(id: i32) -> Self {
                    Self(id)
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )+
    };
}

id_type!(
    /// Back-office user (translator, editor, admin, ...)
    UserId,
    UserRoleId,
    OrderId,
    CompanyId,
    LanguageId,
    SourceTargetLanguageId,
    TerminologyId,
    CompanyTerminologyId,
    PriceListId,
    CustomerId,
    MessageId,
    ReferenceItemId,
    UserContactId,
    UserAbilityId,
    TechnologyKnowledgeId,
    UserPaymentId,
    UserRateId,
    RateItemId,
);
