//! Language service
//!
//! Languages are soft-deleted; source/target pairs are join rows and are
//! removed outright.

use std::sync::Arc;

use crate::domain::entities::{
    Language, LanguageFields, LanguageId, LanguagePair, SourceTargetLanguage, UserId,
};
use crate::domain::ports::LanguageRepository;
use crate::error::AppError;

pub struct LanguageService<LR>
where
    LR: LanguageRepository,
{
    languages: Arc<LR>,
}

impl<LR> LanguageService<LR>
where
    LR: LanguageRepository,
{
    pub fn new(languages: Arc<LR>) -> Self {
        Self { languages }
    }

    pub async fn list(&self, active: Option<bool>) -> Result<Vec<Language>, AppError> {
        Ok(self.languages.find_all(active).await?)
    }

    pub async fn get(&self, id: LanguageId) -> Result<Language, AppError> {
        self.languages
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("language {}", id)))
    }

    pub async fn add(&self, fields: LanguageFields, actor: UserId) -> Result<Language, AppError> {
        Ok(self.languages.create(&fields, actor).await?)
    }

    pub async fn update(
        &self,
        id: LanguageId,
        fields: LanguageFields,
        actor: UserId,
    ) -> Result<Language, AppError> {
        self.get(id).await?;
        Ok(self.languages.update(id, &fields, actor).await?)
    }

    pub async fn delete(&self, id: LanguageId, actor: UserId) -> Result<Language, AppError> {
        self.get(id).await?;
        Ok(self.languages.set_active(id, false, actor).await?)
    }

    /// Pairs offered from the given source language
    pub async fn target_languages(
        &self,
        source: LanguageId,
    ) -> Result<Vec<SourceTargetLanguage>, AppError> {
        Ok(self.languages.find_pairs_by_source(source).await?)
    }

    pub async fn add_pair(
        &self,
        pair: LanguagePair,
        actor: UserId,
    ) -> Result<SourceTargetLanguage, AppError> {
        if pair.source_language_id == pair.target_language_id {
            return Err(AppError::BadRequest(
                "source and target language are the same".to_string(),
            ));
        }
        Ok(self.languages.create_pair(&pair, actor).await?)
    }

    pub async fn delete_pair(&self, pair: LanguagePair) -> Result<SourceTargetLanguage, AppError> {
        self.languages.delete_pair(&pair).await?.ok_or_else(|| {
            AppError::NotFound(format!(
                "language pair {} -> {}",
                pair.source_language_id, pair.target_language_id
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_language, InMemoryLanguageRepository};

    fn pair(source: i32, target: i32) -> LanguagePair {
        LanguagePair {
            source_language_id: LanguageId(source),
            target_language_id: LanguageId(target),
        }
    }

    fn create_service() -> LanguageService<InMemoryLanguageRepository> {
        LanguageService::new(Arc::new(
            InMemoryLanguageRepository::new()
                .with_language(test_language(1, "English"))
                .with_language(test_language(2, "Turkish"))
                .with_language(test_language(3, "German")),
        ))
    }

    #[tokio::test]
    async fn delete_language_is_soft() {
        let service = create_service();

        let deleted = service.delete(LanguageId(2), UserId(1)).await.unwrap();

        assert!(!deleted.audit.active);
        assert_eq!(service.list(None).await.unwrap().len(), 3);
        assert_eq!(service.list(Some(true)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_keeps_audit_creation_data() {
        let service = create_service();

        let updated = service
            .update(
                LanguageId(1),
                LanguageFields {
                    name: "British English".to_string(),
                },
                UserId(4),
            )
            .await
            .unwrap();

        assert_eq!(updated.fields.name, "British English");
        assert_eq!(updated.audit.created_by, UserId(1));
        assert_eq!(updated.audit.updated_by, Some(UserId(4)));
    }

    #[tokio::test]
    async fn pairs_are_listed_by_source_and_hard_deleted() {
        let service = create_service();

        service.add_pair(pair(1, 2), UserId(1)).await.unwrap();
        service.add_pair(pair(1, 3), UserId(1)).await.unwrap();
        service.add_pair(pair(2, 1), UserId(1)).await.unwrap();

        let from_english = service.target_languages(LanguageId(1)).await.unwrap();
        assert_eq!(from_english.len(), 2);

        let removed = service.delete_pair(pair(1, 2)).await.unwrap();
        assert_eq!(removed.pair, pair(1, 2));

        let from_english = service.target_languages(LanguageId(1)).await.unwrap();
        assert_eq!(from_english.len(), 1);
        assert_eq!(from_english[0].pair.target_language_id, LanguageId(3));

        let again = service.delete_pair(pair(1, 2)).await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn same_language_pair_is_rejected() {
        let service = create_service();

        let result = service.add_pair(pair(1, 1), UserId(1)).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn get_missing_language_fails() {
        let service = create_service();

        assert!(matches!(
            service.get(LanguageId(99)).await,
            Err(AppError::NotFound(_))
        ));
    }
}
