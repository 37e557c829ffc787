//! Demo content loaded into a fresh session

use chrono::NaiveDate;

use crate::domain::{
    Appointment, Category, GeoPoint, MESSAGE_TIME_FORMAT, MeetupStatus, Message, Place,
    SharedMap, SuggestedPlace,
};

fn place(
    id: &str,
    name: &str,
    (lat, lng): (f64, f64),
    category_id: &str,
    author: &str,
    comment: &str,
    is_favorite: bool,
) -> Place {
    Place {
        id: id.to_string(),
        name: name.to_string(),
        coordinates: GeoPoint::new(lat, lng),
        category_id: category_id.to_string(),
        author: author.to_string(),
        comment: comment.to_string(),
        is_favorite,
        is_imported_favorite: false,
    }
}

pub fn categories() -> Vec<Category> {
    vec![
        Category::new("restaurant", "맛집", "#ef4444", "🍽️"),
        Category::new("cafe", "카페", "#3b82f6", "☕"),
        Category::new("entertainment", "엔터테인먼트", "#8b5cf6", "🎉"),
        Category::new("culture", "문화", "#10b981", "🎨"),
    ]
}

pub fn places() -> Vec<Place> {
    vec![
        place(
            "1",
            "홍대 맛집 - 교촌치킨",
            (37.5563, 126.9236),
            "restaurant",
            "맛집헌터",
            "치킨이 정말 맛있어요!",
            false,
        ),
        place(
            "2",
            "스타벅스 홍대점",
            (37.5573, 126.9246),
            "cafe",
            "카페러버",
            "공부하기 좋은 곳",
            true,
        ),
        place(
            "3",
            "홍대 클럽 - 클럽 에반스",
            (37.5553, 126.9226),
            "entertainment",
            "파티피플",
            "주말 밤에 최고!",
            false,
        ),
        Place {
            is_imported_favorite: true,
            ..place(
                "4",
                "홍대 서점 - 교보문고",
                (37.5583, 126.9256),
                "culture",
                "책벌레",
                "다양한 책이 있어요",
                true,
            )
        },
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn message(id: &str, author: &str, text: &str, timestamp: &str) -> Option<Message> {
    let timestamp = chrono::NaiveDateTime::parse_from_str(timestamp, MESSAGE_TIME_FORMAT).ok()?;
    Some(Message {
        id: id.to_string(),
        author: author.to_string(),
        text: text.to_string(),
        timestamp,
    })
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: "1".to_string(),
            title: "홍대 친구 모임".to_string(),
            description: "오랜만에 만나는 대학 친구들과의 모임".to_string(),
            created_at: date(2024, 1, 15),
            meeting_date: date(2024, 1, 25),
            status: MeetupStatus::Voting,
            participants: names(&["김철수", "이영희", "박민수", "정수진"]),
            suggested_places: vec![
                SuggestedPlace::new("1", "홍대 교촌치킨", &["김철수", "이영희", "박민수"]),
                SuggestedPlace::new("2", "스타벅스 홍대점", &["정수진", "이영희"]),
                SuggestedPlace::new("3", "홍대 클럽 에반스", &["김철수"]),
            ],
            messages: [
                message("1", "김철수", "교촌치킨 어때요? 맛있을 것 같은데", "2024-01-16 14:30"),
                message("2", "이영희", "좋아요! 저도 치킨 먹고 싶었어요", "2024-01-16 15:15"),
            ]
            .into_iter()
            .flatten()
            .collect(),
        },
        Appointment {
            id: "2".to_string(),
            title: "회사 팀 빌딩".to_string(),
            description: "분기별 팀 빌딩 모임".to_string(),
            created_at: date(2024, 1, 12),
            meeting_date: date(2024, 1, 30),
            status: MeetupStatus::Planning,
            participants: names(&["팀장님", "동료A", "동료B", "동료C", "나"]),
            suggested_places: Vec::new(),
            messages: Vec::new(),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn shared_map(
    id: &str,
    title: &str,
    description: &str,
    created_at: NaiveDate,
    (view_count, share_count, participant_count): (u32, u32, u32),
    region: &str,
    categories: &[&str],
    is_active: bool,
) -> SharedMap {
    SharedMap {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        created_at,
        view_count,
        share_count,
        participant_count,
        region: region.to_string(),
        categories: names(categories),
        is_active,
        share_url: format!("https://example.com/shared/{id}"),
    }
}

pub fn shared_maps() -> Vec<SharedMap> {
    vec![
        shared_map(
            "1",
            "홍대 맛집 투어",
            "친구들과 함께 가볼 홍대 맛집들",
            date(2024, 1, 15),
            (45, 12, 8),
            "서울특별시 마포구 홍대 일대",
            &["맛집", "카페"],
            true,
        ),
        shared_map(
            "2",
            "강남 데이트 코스",
            "연인과 함께 가기 좋은 강남 장소들",
            date(2024, 1, 10),
            (23, 5, 3),
            "서울특별시 강남구 강남역 일대",
            &["카페", "문화", "엔터테인먼트"],
            true,
        ),
        shared_map(
            "3",
            "이태원 핫플레이스",
            "이태원의 트렌디한 장소들 모음",
            date(2024, 1, 5),
            (67, 18, 15),
            "서울특별시 용산구 이태원 일대",
            &["맛집", "엔터테인먼트"],
            false,
        ),
    ]
}
