// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Datelike, Utc};
use serde_json::{json, Map, Value};

use crate::generator::faker::Faker;

/// 合成记录
///
/// 字段名到生成值的映射，形状由实体类型决定
pub type SyntheticRecord = Map<String, Value>;

/// 用户角色
///
/// 封闭枚举，每种角色对应目标系统中不同的登录上下文和API权限面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// 管理员
    Admin,
    /// 教师
    Teacher,
    /// 学生
    Student,
    /// 家长
    Parent,
}

impl Role {
    /// 角色的字符串表示（与API载荷一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }

    /// 所有角色
    pub fn all() -> [Role; 4] {
        [Role::Admin, Role::Teacher, Role::Student, Role::Parent]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 实体类型
///
/// 每种类型对应一个创建端点的载荷形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Class,
    Subject,
    Homework,
    Attendance,
    Timetable,
    Notification,
    QaMessage,
    Complaint,
    Grade,
    File,
}

impl EntityKind {
    /// 所有实体类型
    pub fn all() -> [EntityKind; 11] {
        [
            EntityKind::User,
            EntityKind::Class,
            EntityKind::Subject,
            EntityKind::Homework,
            EntityKind::Attendance,
            EntityKind::Timetable,
            EntityKind::Notification,
            EntityKind::QaMessage,
            EntityKind::Complaint,
            EntityKind::Grade,
            EntityKind::File,
        ]
    }

    /// 该实体创建端点要求的必填字段
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::User => &["firstName", "lastName", "email", "password", "role"],
            EntityKind::Class => &["name", "section", "academicYear", "maxStudents"],
            EntityKind::Subject => &["name", "code"],
            EntityKind::Homework => &["title", "description", "dueDate", "maxMarks"],
            EntityKind::Attendance => &["date", "status"],
            EntityKind::Timetable => &["dayOfWeek", "periodNumber", "startTime", "endTime"],
            EntityKind::Notification => &["title", "message", "type", "priority"],
            EntityKind::QaMessage => &["message", "priority", "status"],
            EntityKind::Complaint => &["subject", "description", "category", "status"],
            EntityKind::Grade => &["examType", "marksObtained", "maxMarks", "grade"],
            EntityKind::File => &["fileName", "fileType", "fileSize"],
        }
    }
}

/// 按分数计算等级（固定标尺）
pub fn grade_for_marks(marks: i64) -> &'static str {
    match marks {
        m if m >= 90 => "A+",
        m if m >= 80 => "A",
        m if m >= 70 => "B+",
        m if m >= 60 => "B",
        m if m >= 50 => "C+",
        m if m >= 40 => "C",
        _ => "F",
    }
}

fn into_record(value: Value) -> SyntheticRecord {
    match value {
        Value::Object(map) => map,
        // json!字面量始终是对象
        _ => SyntheticRecord::new(),
    }
}

/// 测试数据生成器
///
/// 为各实体类型生成默认有效的合成载荷，以及用于负向测试的无效变体
/// 和边界场景变体。生成是纯内存合成，不会失败。
pub struct DataGenerator {
    faker: Faker,
}

impl DataGenerator {
    /// 使用固定种子创建生成器
    ///
    /// 相同种子的两个生成器在相同的调用序列下产生相同的记录序列
    pub fn new(seed: u64) -> Self {
        Self {
            faker: Faker::new(seed),
        }
    }

    /// 使用操作系统熵源创建生成器
    pub fn from_entropy() -> Self {
        Self {
            faker: Faker::from_entropy(),
        }
    }

    /// 按实体类型生成一条默认有效的记录
    ///
    /// User类型按role分支，缺省为学生
    pub fn generate(&mut self, kind: EntityKind, role: Option<Role>) -> SyntheticRecord {
        match kind {
            EntityKind::User => self.generate_user(role.unwrap_or(Role::Student)),
            EntityKind::Class => self.generate_class(),
            EntityKind::Subject => self.generate_subject(),
            EntityKind::Homework => self.generate_homework(None, None, None),
            EntityKind::Attendance => self.generate_attendance(None, None, None),
            EntityKind::Timetable => self.generate_timetable(None, None, None),
            EntityKind::Notification => self.generate_notification(),
            EntityKind::QaMessage => self.generate_qa_message(None, None),
            EntityKind::Complaint => self.generate_complaint(None, None),
            EntityKind::Grade => self.generate_grade(None, None, None),
            EntityKind::File => self.generate_file(),
        }
    }

    /// 生成用户记录，形状按角色分支
    pub fn generate_user(&mut self, role: Role) -> SyntheticRecord {
        let mut record = into_record(json!({
            "firstName": self.faker.first_name(),
            "lastName": self.faker.last_name(),
            "email": self.faker.email(),
            "password": self.faker.password(8),
            "phone": self.faker.phone(),
            "dateOfBirth": self.faker.date_of_birth(5, 65).format("%Y-%m-%d").to_string(),
            "gender": self.faker.pick(&["male", "female", "other"]),
            "address": self.faker.address(),
            "role": role.as_str(),
            "isActive": true,
        }));

        match role {
            Role::Admin => {
                record.insert(
                    "employeeId".into(),
                    json!(format!("ADM{}", self.faker.number(1000, 9999))),
                );
            }
            Role::Teacher => {
                record.insert(
                    "employeeId".into(),
                    json!(format!("TCH{}", self.faker.number(1000, 9999))),
                );
                record.insert(
                    "qualification".into(),
                    json!(self.faker.pick(&["B.Ed", "M.Ed", "PhD", "Masters"])),
                );
                record.insert("experienceYears".into(), json!(self.faker.number(1, 20)));
                let count = self.faker.number(1, 3) as usize;
                record.insert(
                    "subjects".into(),
                    json!(self.faker.pick_many(
                        &["Math", "Science", "English", "History", "Geography"],
                        count
                    )),
                );
                record.insert("isClassTeacher".into(), json!(self.faker.chance(0.5)));
            }
            Role::Student => {
                record.insert(
                    "admissionNumber".into(),
                    json!(format!("STU{}", self.faker.number(10000, 99999))),
                );
                record.insert(
                    "admissionDate".into(),
                    json!(self.faker.past_date(730).format("%Y-%m-%d").to_string()),
                );
                record.insert("rollNumber".into(), json!(self.faker.number(1, 50)));
                record.insert("fatherName".into(), json!(self.faker.male_name()));
                record.insert("motherName".into(), json!(self.faker.female_name()));
                record.insert("fatherPhone".into(), json!(self.faker.phone()));
                record.insert("motherPhone".into(), json!(self.faker.phone()));
                // 班级在创建班级后再关联
                record.insert("classId".into(), Value::Null);
            }
            Role::Parent => {
                record.insert("occupation".into(), json!(self.faker.job()));
                record.insert(
                    "relationship".into(),
                    json!(self.faker.pick(&["father", "mother", "guardian"])),
                );
            }
        }

        record
    }

    /// 生成班级记录
    ///
    /// academicYear固定为"<当前年>-<次年>"
    pub fn generate_class(&mut self) -> SyntheticRecord {
        let year = Utc::now().year();
        into_record(json!({
            "name": format!("Class {}", self.faker.number(1, 12)),
            "section": self.faker.pick(&["A", "B", "C", "D"]),
            "academicYear": format!("{}-{}", year, year + 1),
            "roomNumber": format!("Room {}", self.faker.number(100, 999)),
            "maxStudents": self.faker.number(30, 50),
            "isActive": true,
        }))
    }

    /// 生成科目记录（从固定科目表中取样）
    pub fn generate_subject(&mut self) -> SyntheticRecord {
        const SUBJECTS: &[(&str, &str, &str)] = &[
            ("Mathematics", "MATH", "Core mathematics subject"),
            ("Science", "SCI", "General science subject"),
            ("English", "ENG", "English language and literature"),
            ("History", "HIST", "World history"),
            ("Geography", "GEO", "Physical and human geography"),
            ("Computer Science", "CS", "Computer programming and concepts"),
            ("Physical Education", "PE", "Sports and physical activities"),
            ("Art", "ART", "Visual arts and crafts"),
            ("Music", "MUS", "Music theory and practice"),
            ("Economics", "ECON", "Basic economic principles"),
        ];
        let idx = self.faker.number(0, SUBJECTS.len() as i64 - 1) as usize;
        let (name, code, description) = SUBJECTS[idx];
        into_record(json!({
            "name": name,
            "code": code,
            "description": description,
        }))
    }

    /// 生成作业记录
    pub fn generate_homework(
        &mut self,
        class_id: Option<&str>,
        subject_id: Option<&str>,
        teacher_id: Option<&str>,
    ) -> SyntheticRecord {
        into_record(json!({
            "title": format!("Homework {}", self.faker.number(1, 100)),
            "description": self.faker.text(200),
            "dueDate": self.faker.future_date(1, 7).format("%Y-%m-%d").to_string(),
            "maxMarks": self.faker.number(10, 100),
            "classId": class_id,
            "subjectId": subject_id,
            "teacherId": teacher_id,
            "isPublished": self.faker.chance(0.5),
        }))
    }

    /// 生成考勤记录
    pub fn generate_attendance(
        &mut self,
        student_id: Option<&str>,
        class_id: Option<&str>,
        teacher_id: Option<&str>,
    ) -> SyntheticRecord {
        let remarks = if self.faker.chance(0.5) {
            json!(self.faker.text(100))
        } else {
            Value::Null
        };
        into_record(json!({
            "studentId": student_id,
            "classId": class_id,
            "date": Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            "status": self.faker.pick(&["present", "absent", "late", "excused"]),
            "markedBy": teacher_id,
            "remarks": remarks,
        }))
    }

    /// 生成课程表记录
    pub fn generate_timetable(
        &mut self,
        class_id: Option<&str>,
        subject_id: Option<&str>,
        teacher_id: Option<&str>,
    ) -> SyntheticRecord {
        let start_hour = self.faker.number(8, 15);
        into_record(json!({
            "classId": class_id,
            "subjectId": subject_id,
            "teacherId": teacher_id,
            "dayOfWeek": self.faker.pick(&[
                "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
            ]),
            "periodNumber": self.faker.number(1, 8),
            "startTime": format!("{:02}:00", start_hour),
            "endTime": format!("{:02}:00", start_hour + 1),
            "roomNumber": format!("Room {}", self.faker.number(100, 999)),
        }))
    }

    /// 生成通知记录
    pub fn generate_notification(&mut self) -> SyntheticRecord {
        into_record(json!({
            "title": format!("Notification {}", self.faker.number(1, 100)),
            "message": self.faker.text(500),
            "type": self.faker.pick(&[
                "announcement", "homework", "attendance", "complaint", "qa", "general",
            ]),
            "priority": self.faker.pick(&["low", "medium", "high", "urgent"]),
            "isActive": true,
        }))
    }

    /// 生成问答消息记录
    pub fn generate_qa_message(
        &mut self,
        student_id: Option<&str>,
        parent_id: Option<&str>,
    ) -> SyntheticRecord {
        into_record(json!({
            "studentId": student_id,
            "parentId": parent_id,
            "message": self.faker.text(300),
            "priority": self.faker.pick(&["low", "medium", "high"]),
            "status": "pending",
        }))
    }

    /// 生成投诉记录
    pub fn generate_complaint(
        &mut self,
        student_id: Option<&str>,
        parent_id: Option<&str>,
    ) -> SyntheticRecord {
        into_record(json!({
            "studentId": student_id,
            "parentId": parent_id,
            "subject": format!("Complaint {}", self.faker.number(1, 100)),
            "description": self.faker.text(500),
            "category": self.faker.pick(&["academic", "behavioral", "disciplinary", "other"]),
            "priority": self.faker.pick(&["low", "medium", "high", "urgent"]),
            "status": "open",
        }))
    }

    /// 生成成绩记录
    pub fn generate_grade(
        &mut self,
        student_id: Option<&str>,
        subject_id: Option<&str>,
        teacher_id: Option<&str>,
    ) -> SyntheticRecord {
        let marks = self.faker.number(0, 100);
        let remarks = if self.faker.chance(0.5) {
            json!(self.faker.text(100))
        } else {
            Value::Null
        };
        into_record(json!({
            "studentId": student_id,
            "subjectId": subject_id,
            "teacherId": teacher_id,
            "examType": self.faker.pick(&["quiz", "midterm", "final", "assignment", "project"]),
            "marksObtained": marks,
            "maxMarks": 100,
            "grade": grade_for_marks(marks),
            "remarks": remarks,
        }))
    }

    /// 生成文件上传元数据记录
    pub fn generate_file(&mut self) -> SyntheticRecord {
        let extension = self.faker.pick(&["pdf", "doc", "docx", "jpg", "png", "txt"]);
        into_record(json!({
            "fileName": format!("test_file_{}.{}", self.faker.number(1, 1000), extension),
            "fileType": self.faker.pick(&["homework", "profile", "document", "general"]),
            "description": self.faker.text(100),
            // 1KiB到10MiB
            "fileSize": self.faker.number(1024, 10_485_760),
        }))
    }

    /// 生成8位随机密码
    pub fn generate_password(&mut self) -> String {
        self.faker.password(8)
    }

    /// 按实体类型从固定目录中取一条无效记录
    ///
    /// 每条目录项都至少违反一个generate满足的约束：必填字段为空、
    /// 邮箱或日期格式错误、数值为负或类型错误、字符串超长
    pub fn generate_invalid(&mut self, kind: EntityKind) -> SyntheticRecord {
        let catalog: Vec<Value> = match kind {
            EntityKind::User => vec![
                json!({"email": "invalid-email", "password": "123"}),
                json!({"email": "", "password": ""}),
                json!({"email": "test@test.com", "password": "a".repeat(100)}),
                json!({"firstName": "", "lastName": ""}),
                json!({"phone": "invalid-phone"}),
                json!({"dateOfBirth": "invalid-date"}),
            ],
            EntityKind::Class => vec![
                json!({"name": "", "section": ""}),
                json!({"name": "A".repeat(100), "section": "B".repeat(100)}),
                json!({"maxStudents": -1}),
                json!({"maxStudents": "invalid"}),
            ],
            EntityKind::Subject => vec![
                json!({"name": "", "code": ""}),
                json!({"code": "X".repeat(100)}),
            ],
            EntityKind::Homework => vec![
                json!({"title": "", "description": ""}),
                json!({"dueDate": "invalid-date"}),
                json!({"maxMarks": -1}),
                json!({"maxMarks": "invalid"}),
            ],
            EntityKind::Attendance => vec![
                json!({"date": "invalid-date"}),
                json!({"status": "vanished"}),
                json!({"date": "", "status": ""}),
            ],
            EntityKind::Timetable => vec![
                json!({"dayOfWeek": "Noday"}),
                json!({"periodNumber": -1}),
                json!({"startTime": "25:99"}),
            ],
            EntityKind::Notification => vec![
                json!({"title": "", "message": ""}),
                json!({"priority": "catastrophic"}),
                json!({"type": ""}),
            ],
            EntityKind::QaMessage => vec![
                json!({"message": ""}),
                json!({"priority": "extreme"}),
            ],
            EntityKind::Complaint => vec![
                json!({"subject": "", "description": ""}),
                json!({"category": "unknown-category"}),
            ],
            EntityKind::Grade => vec![
                json!({"marksObtained": -10}),
                json!({"marksObtained": 150, "maxMarks": 100}),
                json!({"examType": ""}),
            ],
            EntityKind::File => vec![
                json!({"fileName": ""}),
                json!({"fileSize": -1024}),
            ],
        };
        let idx = self.faker.number(0, catalog.len() as i64 - 1) as usize;
        into_record(catalog[idx].clone())
    }

    /// 按实体类型生成边界有效的记录
    ///
    /// 取值在校验规则允许的边缘：最短/最长字符串、零和极大数值
    // TODO: extend the edge catalog to attendance and grade kinds
    pub fn generate_edge_case(&mut self, kind: EntityKind) -> SyntheticRecord {
        match kind {
            EntityKind::User => into_record(json!({
                "email": format!("{}@{}.com", "a".repeat(50), "b".repeat(50)),
                "firstName": "A",
                "lastName": "B".repeat(100),
                "phone": "12345678901234567890",
            })),
            EntityKind::Class => into_record(json!({
                "name": "A",
                "section": "B".repeat(100),
                "maxStudents": 999_999,
            })),
            EntityKind::Homework => into_record(json!({
                "title": "A",
                "description": "",
                "dueDate": Utc::now().date_naive().format("%Y-%m-%d").to_string(),
                "maxMarks": 0,
            })),
            // 其余类型尚无专门的边界目录，退回默认有效记录
            other => self.generate(other, None),
        }
    }
}
