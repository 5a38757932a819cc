//! # Family Plan and Credit Ledger
//!
//! Tracks the members sharing a subscription and the session's parcel
//! credit balance. Adding a member grants [`MEMBER_BONUS_CREDITS`] in the
//! same call that appends the member; removing one does not claw the bonus
//! back. Plan-tier member limits are marketing text and are not enforced.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use locker_core::{FacilityError, MemberId, Notice};

/// Credits granted for each member added.
pub const MEMBER_BONUS_CREDITS: u32 = 5;

/// Errors from family plan operations. None of them mutate the plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FamilyError {
    /// Name was empty after trimming whitespace.
    #[error("member name must not be empty")]
    EmptyName,

    /// No member with this id.
    #[error("family member {0} not found")]
    NotFound(MemberId),

    /// Two members in the initial list share an id.
    #[error("duplicate family member id {0}")]
    DuplicateId(MemberId),

    /// The bonus would overflow the credit balance.
    #[error("credit balance {balance} cannot take a {bonus} credit bonus")]
    CreditOverflow {
        /// Balance before the add.
        balance: u32,
        /// Bonus that did not fit.
        bonus: u32,
    },
}

impl From<FamilyError> for FacilityError {
    fn from(err: FamilyError) -> Self {
        match err {
            FamilyError::EmptyName | FamilyError::CreditOverflow { .. } => {
                FacilityError::Validation(err.to_string())
            }
            FamilyError::NotFound(_) => FacilityError::NotFound(err.to_string()),
            FamilyError::DuplicateId(_) => FacilityError::Fixture(err.to_string()),
        }
    }
}

/// A person sharing the subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    /// Immutable identity.
    pub id: MemberId,
    /// Display name.
    pub name: String,
}

/// Members in insertion order plus the credit balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyPlan {
    members: Vec<FamilyMember>,
    credits: u32,
    next_id: MemberId,
}

impl FamilyPlan {
    /// Build a plan from the initial members and balance.
    pub fn new(members: Vec<FamilyMember>, credits: u32) -> Result<Self, FamilyError> {
        for (i, member) in members.iter().enumerate() {
            if members[..i].iter().any(|m| m.id == member.id) {
                return Err(FamilyError::DuplicateId(member.id));
            }
        }
        let next_id = members
            .iter()
            .map(|m| m.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(MemberId(1));
        Ok(Self {
            members,
            credits,
            next_id,
        })
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[FamilyMember] {
        &self.members
    }

    /// Look up a member.
    pub fn get(&self, id: MemberId) -> Option<&FamilyMember> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Current credit balance.
    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Add a member with a fresh id and grant the bonus credits.
    ///
    /// Returns the new member and the confirmation notice.
    pub fn add_member(&mut self, name: &str) -> Result<(FamilyMember, Notice), FamilyError> {
        let name = normalize_name(name)?;
        let credits = self
            .credits
            .checked_add(MEMBER_BONUS_CREDITS)
            .ok_or(FamilyError::CreditOverflow {
                balance: self.credits,
                bonus: MEMBER_BONUS_CREDITS,
            })?;
        let member = FamilyMember {
            id: self.next_id,
            name,
        };
        self.next_id = self.next_id.next();
        self.members.push(member.clone());
        self.credits = credits;

        let notice = Notice::MemberAdded {
            name: member.name.clone(),
            bonus: MEMBER_BONUS_CREDITS,
        };
        Ok((member, notice))
    }

    /// Rename a member. The id never changes.
    pub fn edit_member(&mut self, id: MemberId, new_name: &str) -> Result<Notice, FamilyError> {
        let name = normalize_name(new_name)?;
        let member = self
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(FamilyError::NotFound(id))?;
        member.name = name;
        Ok(Notice::MemberUpdated)
    }

    /// Remove a member. Returns whether one was removed; absent ids are a
    /// no-op. Credits are left untouched.
    pub fn delete_member(&mut self, id: MemberId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        self.members.len() != before
    }
}

fn normalize_name(name: &str) -> Result<String, FamilyError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FamilyError::EmptyName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> FamilyPlan {
        FamilyPlan::new(
            vec![
                FamilyMember {
                    id: MemberId(1),
                    name: "Spouse".to_string(),
                },
                FamilyMember {
                    id: MemberId(2),
                    name: "Child".to_string(),
                },
            ],
            12,
        )
        .unwrap()
    }

    #[test]
    fn test_add_member_grants_bonus() {
        let mut plan = seeded();
        let (member, notice) = plan.add_member("  Grandma ").unwrap();
        assert_eq!(member.name, "Grandma");
        assert_eq!(member.id, MemberId(3));
        assert_eq!(plan.credits(), 17);
        assert_eq!(plan.members().last(), Some(&member));
        assert_eq!(
            notice,
            Notice::MemberAdded {
                name: "Grandma".to_string(),
                bonus: 5
            }
        );
    }

    #[test]
    fn test_add_member_ids_are_unique() {
        let mut plan = seeded();
        let (a, _) = plan.add_member("A").unwrap();
        plan.delete_member(a.id);
        let (b, _) = plan.add_member("B").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_add_blank_name_rejected() {
        let mut plan = seeded();
        assert_eq!(plan.add_member(" \t ").unwrap_err(), FamilyError::EmptyName);
        assert_eq!(plan.credits(), 12);
        assert_eq!(plan.members().len(), 2);
    }

    #[test]
    fn test_add_member_refuses_credit_overflow() {
        let mut plan = FamilyPlan::new(Vec::new(), u32::MAX - 2).unwrap();
        let err = plan.add_member("Cousin").unwrap_err();
        assert!(matches!(err, FamilyError::CreditOverflow { bonus: 5, .. }));
        assert!(plan.members().is_empty());
        assert_eq!(plan.credits(), u32::MAX - 2);

        let (member, _) = FamilyPlan::new(Vec::new(), u32::MAX - 5)
            .unwrap()
            .add_member("Cousin")
            .unwrap();
        assert_eq!(member.id, MemberId(1));
    }

    #[test]
    fn test_edit_member_keeps_id() {
        let mut plan = seeded();
        plan.edit_member(MemberId(2), "Daughter").unwrap();
        let member = plan.get(MemberId(2)).unwrap();
        assert_eq!(member.name, "Daughter");
        assert_eq!(plan.members()[1].id, MemberId(2));
    }

    #[test]
    fn test_edit_blank_or_missing() {
        let mut plan = seeded();
        assert_eq!(plan.edit_member(MemberId(1), "  "), Err(FamilyError::EmptyName));
        assert_eq!(plan.get(MemberId(1)).unwrap().name, "Spouse");
        assert_eq!(
            plan.edit_member(MemberId(9), "Ghost"),
            Err(FamilyError::NotFound(MemberId(9)))
        );
    }

    #[test]
    fn test_delete_is_idempotent_and_keeps_credits() {
        let mut plan = seeded();
        assert!(plan.delete_member(MemberId(1)));
        assert!(!plan.delete_member(MemberId(1)));
        assert_eq!(plan.members().len(), 1);
        assert_eq!(plan.credits(), 12);
    }

    #[test]
    fn test_empty_plan_starts_ids_at_one() {
        let mut plan = FamilyPlan::new(Vec::new(), 0).unwrap();
        let (member, _) = plan.add_member("First").unwrap();
        assert_eq!(member.id, MemberId(1));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dup = FamilyMember {
            id: MemberId(1),
            name: "X".to_string(),
        };
        assert_eq!(
            FamilyPlan::new(vec![dup.clone(), dup], 0).unwrap_err(),
            FamilyError::DuplicateId(MemberId(1))
        );
    }

    #[test]
    fn test_errors_map_into_facility_error() {
        let err: FacilityError = FamilyError::EmptyName.into();
        assert!(matches!(err, FacilityError::Validation(_)));
        let err: FacilityError = FamilyError::NotFound(MemberId(4)).into();
        assert_eq!(err.to_string(), "not found: family member 4 not found");
    }
}
