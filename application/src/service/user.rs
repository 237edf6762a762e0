use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{UserDraft, UserEmail, UserId, UserName};
use kernel::KernelError;

use crate::service::lookup::{reject_blank, require_user};
use crate::transfer::{CreateUserDto, DeleteUserDto, GetUserDto, UpdateUserDto, UserDto};

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery {
    async fn get_user(&self, dto: GetUserDto) -> error_stack::Result<UserDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let user = require_user(self, &mut connection, &UserId::new(dto.id)).await?;
        connection.commit().await?;
        Ok(UserDto::from(user))
    }

    async fn get_all_users(&self) -> error_stack::Result<Vec<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let users = self.user_query().find_all(&mut connection).await?;
        connection.commit().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery {}

#[async_trait::async_trait]
pub trait CreateUserService: 'static + Sync + Send + DependOnUserModifier {
    async fn create_user(&self, dto: CreateUserDto) -> error_stack::Result<UserDto, KernelError> {
        reject_blank("User name", &dto.name)?;
        let email = UserEmail::parse(dto.email)?;
        let draft = UserDraft::new(UserName::new(dto.name), email);

        let mut connection = self.database_connection().transact().await?;
        let user = self
            .user_modifier()
            .create(&mut connection, &draft)
            .await?;
        connection.commit().await?;

        tracing::info!("user {} created", user.id().as_ref());
        Ok(UserDto::from(user))
    }
}

impl<T> CreateUserService for T where T: DependOnUserModifier {}

#[async_trait::async_trait]
pub trait UpdateUserService: 'static + Sync + Send + DependOnUserQuery + DependOnUserModifier {
    async fn update_user(&self, dto: UpdateUserDto) -> error_stack::Result<UserDto, KernelError> {
        let name = match dto.name {
            Some(name) => {
                reject_blank("User name", &name)?;
                Some(UserName::new(name))
            }
            None => None,
        };
        let email = dto.email.map(UserEmail::parse).transpose()?;

        let mut connection = self.database_connection().transact().await?;
        let mut user = require_user(self, &mut connection, &UserId::new(dto.id)).await?;
        user.substitute(|user| {
            if let Some(name) = name {
                *user.name = name;
            }
            if let Some(email) = email {
                *user.email = email;
            }
        });
        self.user_modifier()
            .update(&mut connection, &user)
            .await?;
        connection.commit().await?;

        Ok(UserDto::from(user))
    }
}

impl<T> UpdateUserService for T where T: DependOnUserQuery + DependOnUserModifier {}

#[async_trait::async_trait]
pub trait DeleteUserService: 'static + Sync + Send + DependOnUserQuery + DependOnUserModifier {
    async fn delete_user(&self, dto: DeleteUserDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let user = require_user(self, &mut connection, &UserId::new(dto.id)).await?;
        self.user_modifier()
            .delete(&mut connection, user.id())
            .await?;
        connection.commit().await?;

        tracing::info!("user {} deleted", user.id().as_ref());
        Ok(())
    }
}

impl<T> DeleteUserService for T where T: DependOnUserQuery + DependOnUserModifier {}
