//! Operator reference data: countries, categories, the curated home-country
//! locations and the demo user.

use asklocal_infra::seed;
use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_tables::{Categories, Countries, Locations, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn build_err(e: impl std::fmt::Display) -> DbErr {
    DbErr::Custom(e.to_string())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut countries = Query::insert();
        countries
            .into_table(Countries::Table)
            .columns([Countries::Code, Countries::Name])
            .on_conflict(OnConflict::column(Countries::Code).do_nothing().to_owned());
        for (code, name) in seed::COUNTRIES {
            countries.values([(*code).into(), (*name).into()]).map_err(build_err)?;
        }
        manager.exec_stmt(countries).await?;

        let mut categories = Query::insert();
        categories
            .into_table(Categories::Table)
            .columns([Categories::Name, Categories::Description])
            .on_conflict(OnConflict::column(Categories::Name).do_nothing().to_owned());
        for (name, description) in seed::CATEGORIES {
            categories
                .values([(*name).into(), (*description).into()])
                .map_err(build_err)?;
        }
        manager.exec_stmt(categories).await?;

        let mut locations = Query::insert();
        locations
            .into_table(Locations::Table)
            .columns([
                Locations::CountryCode,
                Locations::State,
                Locations::Postcode,
                Locations::Suburb,
            ])
            .on_conflict(
                OnConflict::columns([
                    Locations::CountryCode,
                    Locations::State,
                    Locations::Postcode,
                    Locations::Suburb,
                ])
                .do_nothing()
                .to_owned(),
            );
        for (code, state, postcode, suburb) in seed::HOME_LOCATIONS {
            locations
                .values([
                    (*code).into(),
                    (*state).into(),
                    (*postcode).into(),
                    (*suburb).into(),
                ])
                .map_err(build_err)?;
        }
        manager.exec_stmt(locations).await?;

        let mut users = Query::insert();
        users
            .into_table(Users::Table)
            .columns([Users::Username, Users::Email, Users::PasswordHash])
            .on_conflict(OnConflict::column(Users::Username).do_nothing().to_owned());
        for (username, email) in seed::USERS {
            users
                .values([
                    (*username).into(),
                    (*email).into(),
                    seed::UNUSABLE_PASSWORD_HASH.into(),
                ])
                .map_err(build_err)?;
        }
        manager.exec_stmt(users).await?;

        tracing::info!(
            countries = seed::COUNTRIES.len(),
            categories = seed::CATEGORIES.len(),
            locations = seed::HOME_LOCATIONS.len(),
            "Reference data seeded"
        );
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let usernames = seed::USERS.iter().map(|(username, _)| *username);
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Users::Table)
                    .and_where(Expr::col(Users::Username).is_in(usernames))
                    .to_owned(),
            )
            .await?;

        for (code, state, postcode, suburb) in seed::HOME_LOCATIONS {
            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Locations::Table)
                        .and_where(Expr::col(Locations::CountryCode).eq(*code))
                        .and_where(Expr::col(Locations::State).eq(*state))
                        .and_where(Expr::col(Locations::Postcode).eq(*postcode))
                        .and_where(Expr::col(Locations::Suburb).eq(*suburb))
                        .to_owned(),
                )
                .await?;
        }

        let names = seed::CATEGORIES.iter().map(|(name, _)| *name);
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Categories::Table)
                    .and_where(Expr::col(Categories::Name).is_in(names))
                    .to_owned(),
            )
            .await?;

        let codes = seed::COUNTRIES.iter().map(|(code, _)| *code);
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Countries::Table)
                    .and_where(Expr::col(Countries::Code).is_in(codes))
                    .to_owned(),
            )
            .await
    }
}
